use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{CurrencyCode, MinorAmount};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PRODUCTION_BASE_URL: &str = "https://mapi.yuansfer.com";
pub const SANDBOX_BASE_URL: &str = "https://mapi.yuansfer.yunkeguan.com";

/// Yuansfer 网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YuansferConfig {
    /// 商户号
    pub merchant_no: String,

    /// 门店号
    pub store_no: String,

    /// API令牌（用于 verifySign）
    #[serde(skip_serializing)]
    pub api_token: String,

    /// API基础URL
    pub base_url: String,

    /// 账单描述
    pub statement_descriptor: Option<String>,

    /// 是否在 Yuansfer 注册客户
    pub create_account: bool,

    /// 最低订单金额（最小单位）
    pub minimum_amount: MinorAmount,

    /// 商店默认货币
    pub store_currency: CurrencyCode,

    /// 商店首页URL（不带结尾斜杠）
    pub site_url: String,

    /// 是否记录调试日志
    pub logging: bool,

    /// 信用卡支付方式设置
    pub creditcard: MethodSettings,
}

/// 单个支付方式的设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSettings {
    pub enabled: bool,
    pub title: String,
    pub description: Option<String>,
}

impl YuansferConfig {
    pub fn from_env() -> DomainResult<Arc<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok()).map(Arc::new)
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| DomainError::Configuration(format!("{key} must be set")))
        };
        let flag = |key: &str, default: bool| get(key).map(|v| is_truthy(&v)).unwrap_or(default);

        let sandbox = flag("YUANSFER_SANDBOX", false);
        let base_url = get("YUANSFER_BASE_URL").unwrap_or_else(|| {
            if sandbox {
                SANDBOX_BASE_URL.to_string()
            } else {
                PRODUCTION_BASE_URL.to_string()
            }
        });

        let minimum_amount = match get("YUANSFER_MINIMUM_AMOUNT") {
            Some(raw) => raw.parse::<i64>().map(MinorAmount::from_minor).map_err(|e| {
                DomainError::Configuration(format!("YUANSFER_MINIMUM_AMOUNT: {e}"))
            })?,
            None => MinorAmount::from_minor(50),
        };

        Ok(Self {
            merchant_no: required("YUANSFER_MERCHANT_NO")?,
            store_no: required("YUANSFER_STORE_NO")?,
            api_token: required("YUANSFER_API_TOKEN")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            statement_descriptor: get("YUANSFER_STATEMENT_DESCRIPTOR"),
            create_account: flag("YUANSFER_CREATE_ACCOUNT", false),
            minimum_amount,
            store_currency: CurrencyCode::new(
                get("STORE_CURRENCY").unwrap_or_else(|| "USD".to_string()),
            ),
            site_url: get("SITE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            logging: flag("YUANSFER_LOGGING", false),
            creditcard: MethodSettings {
                enabled: flag("YUANSFER_CREDITCARD_ENABLED", true),
                title: get("YUANSFER_CREDITCARD_TITLE")
                    .unwrap_or_else(|| "Yuansfer Credit Card".to_string()),
                description: get("YUANSFER_CREDITCARD_DESCRIPTION"),
            },
        })
    }
}

/// 服务配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub table_prefix: String,
    pub host: String,
    pub port: String,
}

impl ServerConfig {
    pub fn from_env() -> DomainResult<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| DomainError::Configuration("DATABASE_URL must be set".to_string()))?,
            table_prefix: std::env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "wp_".to_string()),
            host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "yes" | "true" | "1" | "on")
}
