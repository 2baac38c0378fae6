use crate::domain::errors::DomainResult;
use crate::domain::{OwnerDetails, PaymentRequest};
use async_trait::async_trait;

/// Yuansfer 接口端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YuansferEndpoint {
    /// online:secure-pay
    SecurePay,
    /// 新增客户
    CustomerAdd,
    /// 更新客户
    CustomerEdit,
}

impl YuansferEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            YuansferEndpoint::SecurePay => "/online/v3/secure-pay",
            YuansferEndpoint::CustomerAdd => "/creditpay/v2/customer/add",
            YuansferEndpoint::CustomerEdit => "/creditpay/v2/customer/edit",
        }
    }
}

/// Yuansfer 支付端口接口
#[async_trait]
pub trait YuansferPort: Send + Sync {
    /// 创建支付源
    ///
    /// Returns the raw processor response. A response starting with `error`
    /// is a processor-side failure; transport failures are `Err`.
    async fn create_secure_pay(&self, request: &PaymentRequest) -> DomainResult<String>;

    /// 注册客户，返回 Yuansfer 客户号
    async fn create_customer(
        &self,
        customer_id: Option<u64>,
        owner: &OwnerDetails,
    ) -> DomainResult<String>;

    /// 更新客户，返回 Yuansfer 客户号
    async fn update_customer(&self, customer_no: &str, owner: &OwnerDetails)
        -> DomainResult<String>;
}
