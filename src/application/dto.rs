use crate::domain::PaymentResult;
use crate::ports::Notice;
use serde::Serialize;

/// 支付方式摘要
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodSummary {
    pub id: String,
    pub title: String,
    pub icon: String,
}

/// 处理支付响应
#[derive(Debug, Serialize)]
pub struct ProcessPaymentResponse {
    #[serde(flatten)]
    pub result: PaymentResult,

    /// 结账页面提示
    pub messages: Vec<Notice>,
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: String, message: String) -> Self {
        Self { error, message }
    }
}
