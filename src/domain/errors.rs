use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 验证错误（面向顾客的提示）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 订单未找到
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// 未注册的支付方式
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Yuansfer 返回的错误
    ///
    /// `message` 用于日志，`localized` 展示给顾客。
    #[error("Yuansfer error: {message}")]
    Processor { message: String, localized: String },

    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP请求错误
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Processor error carrying the same text for the log and for the shopper.
    pub fn processor(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Processor {
            localized: message.clone(),
            message,
        }
    }

    /// Message suitable for a checkout notice.
    pub fn localized_message(&self) -> String {
        match self {
            Self::Processor { localized, .. } => localized.clone(),
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// 领域结果类型
pub type DomainResult<T> = Result<T, DomainError>;
