use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{OwnerDetails, PaymentRequest};
use crate::infrastructure::config::YuansferConfig;
use crate::ports::yuansfer_port::{YuansferEndpoint, YuansferPort};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Yuansfer 成功返回码
const RET_CODE_SUCCESS: &str = "000100";

/// Yuansfer API 适配器实现
#[derive(Clone)]
pub struct YuansferApiAdapter {
    config: Arc<YuansferConfig>,
    client: Client,
}

impl YuansferApiAdapter {
    pub fn new(config: Arc<YuansferConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn with_client(config: Arc<YuansferConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// 生成 verifySign
    ///
    /// Parameters sorted by key, empty values skipped, joined as `k=v&`,
    /// followed by the md5 of the API token; the whole string is md5-hashed.
    pub fn build_signature(params: &BTreeMap<String, String>, api_token: &str) -> String {
        let mut message = String::new();
        for (key, value) in params {
            if value.is_empty() || key == "verifySign" {
                continue;
            }
            message.push_str(key);
            message.push('=');
            message.push_str(value);
            message.push('&');
        }
        message.push_str(&hex::encode(md5::compute(api_token.as_bytes()).0));

        hex::encode(md5::compute(message.as_bytes()).0)
    }

    /// Maps an HTTP exchange onto the raw-string response contract.
    pub fn classify_response(status: reqwest::StatusCode, body: &str) -> String {
        if !status.is_success() {
            return format!("error: HTTP {}: {}", status.as_u16(), body);
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => match json["ret_code"].as_str() {
                Some(code) if code != RET_CODE_SUCCESS => format!(
                    "error: {} {}",
                    code,
                    json["ret_msg"].as_str().unwrap_or_default()
                ),
                _ => body.to_string(),
            },
            Err(_) => body.to_string(),
        }
    }

    /// 发送签名请求，返回状态码与响应体
    async fn post(
        &self,
        endpoint: YuansferEndpoint,
        mut params: BTreeMap<String, String>,
    ) -> DomainResult<(reqwest::StatusCode, String)> {
        let url = format!("{}{}", self.config.base_url, endpoint.path());
        debug!("Yuansfer request to {}: {:?}", endpoint.path(), params);

        let signature = Self::build_signature(&params, &self.config.api_token);
        params.insert("verifySign".to_string(), signature);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Yuansfer response {}: {}", status, body);

        Ok((status, body))
    }

    fn merchant_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("merchantNo".to_string(), self.config.merchant_no.clone());
        params.insert("storeNo".to_string(), self.config.store_no.clone());
        params
    }

    fn owner_params(&self, owner: &OwnerDetails) -> DomainResult<BTreeMap<String, String>> {
        let mut params = self.merchant_params();
        if let serde_json::Value::Object(map) = serde_json::to_value(owner)? {
            for (key, value) in map {
                if let serde_json::Value::String(s) = value {
                    params.insert(key, s);
                }
            }
        }
        Ok(params)
    }

    /// 解析客户接口响应中的客户号
    fn parse_customer_no(status: reqwest::StatusCode, body: &str) -> DomainResult<String> {
        let classified = Self::classify_response(status, body);
        if classified.starts_with("error") {
            error!("Yuansfer customer API error: {}", classified);
            return Err(DomainError::processor(classified));
        }

        let json: serde_json::Value = serde_json::from_str(body)?;
        let info = &json["customerInfo"];
        info["customerNo"]
            .as_str()
            .or_else(|| info["customerCode"].as_str())
            .filter(|no| !no.is_empty())
            .map(String::from)
            .ok_or_else(|| DomainError::processor("error: missing customerNo in response"))
    }
}

#[async_trait]
impl YuansferPort for YuansferApiAdapter {
    /// 创建支付源
    async fn create_secure_pay(&self, request: &PaymentRequest) -> DomainResult<String> {
        let params = request.to_params()?;
        let (status, body) = self.post(YuansferEndpoint::SecurePay, params).await?;

        let response = Self::classify_response(status, &body);
        if response.starts_with("error") {
            error!("Yuansfer secure-pay error: {}", response);
        }
        Ok(response)
    }

    /// 注册客户
    async fn create_customer(
        &self,
        customer_id: Option<u64>,
        owner: &OwnerDetails,
    ) -> DomainResult<String> {
        let mut params = self.owner_params(owner)?;
        if let Some(id) = customer_id {
            params.insert("customerCode".to_string(), id.to_string());
        }

        let (status, body) = self.post(YuansferEndpoint::CustomerAdd, params).await?;
        Self::parse_customer_no(status, &body)
    }

    /// 更新客户
    async fn update_customer(
        &self,
        customer_no: &str,
        owner: &OwnerDetails,
    ) -> DomainResult<String> {
        let mut params = self.owner_params(owner)?;
        params.insert("customerNo".to_string(), customer_no.to_string());

        let (status, body) = self.post(YuansferEndpoint::CustomerEdit, params).await?;
        Self::parse_customer_no(status, &body)
    }
}
