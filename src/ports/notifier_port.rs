use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    Success,
    Notice,
}

/// 结账页面提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// 顾客提示与商户邮件端口接口
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// 为某个订单的结账会话添加提示
    async fn add_notice(&self, order_id: u64, notice: Notice);

    /// 发送订单失败邮件
    async fn send_failed_order_email(&self, order_id: u64) -> DomainResult<()>;
}
