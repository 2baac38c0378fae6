use crate::domain::errors::DomainResult;
use crate::domain::value_objects::MinorAmount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yuansfer secure-pay 请求参数
///
/// Serializes to the flat field set the processor expects. Exactly one of
/// `amount` and `rmb_amount` is set by the request builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_no: String,
    pub store_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<MinorAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rmb_amount: Option<MinorAmount>,
    pub currency: String,
    pub vendor: String,
    pub reference: String,
    pub ipn_url: String,
    pub callback_url: String,
    pub terminal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 扩展字段（由请求修改器添加）
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl PaymentRequest {
    /// Flattens the request into string parameters keyed by wire name.
    pub fn to_params(&self) -> DomainResult<BTreeMap<String, String>> {
        let value = serde_json::to_value(self)?;
        let mut params = BTreeMap::new();
        if let serde_json::Value::Object(map) = value {
            for (key, value) in map {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => continue,
                    other => other.to_string(),
                };
                params.insert(key, value);
            }
        }
        Ok(params)
    }
}

/// 结账结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum PaymentResult {
    Success { redirect: String },
    #[serde(rename = "fail")]
    Failure { redirect: String },
}

impl PaymentResult {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self::Success {
            redirect: redirect.into(),
        }
    }

    /// Failure always carries an empty redirect.
    pub fn failure() -> Self {
        Self::Failure {
            redirect: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn redirect(&self) -> &str {
        match self {
            Self::Success { redirect } | Self::Failure { redirect } => redirect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_use_wire_names_and_skip_unset() {
        let request = PaymentRequest {
            merchant_no: "M1".to_string(),
            store_no: "S1".to_string(),
            rmb_amount: Some(MinorAmount::from_minor(1234)),
            currency: "USD".to_string(),
            vendor: "creditcard".to_string(),
            ..Default::default()
        };

        let params = request.to_params().unwrap();
        assert_eq!(params.get("merchantNo").map(String::as_str), Some("M1"));
        assert_eq!(params.get("rmbAmount").map(String::as_str), Some("1234"));
        assert!(!params.contains_key("amount"));
        assert!(!params.contains_key("customerNo"));
    }

    #[test]
    fn test_extra_fields_are_flattened() {
        let mut request = PaymentRequest::default();
        request.extra.insert("goodsInfo".to_string(), "[]".to_string());

        let params = request.to_params().unwrap();
        assert_eq!(params.get("goodsInfo").map(String::as_str), Some("[]"));
    }

    #[test]
    fn test_result_wire_shape() {
        let ok = serde_json::to_value(PaymentResult::success("https://shop.test/r")).unwrap();
        assert_eq!(ok["result"], "success");
        assert_eq!(ok["redirect"], "https://shop.test/r");

        let fail = serde_json::to_value(PaymentResult::failure()).unwrap();
        assert_eq!(fail["result"], "fail");
        assert_eq!(fail["redirect"], "");
    }
}
