use crate::application::context::CheckoutContext;
use crate::domain::errors::DomainResult;
use crate::domain::{Order, PaymentRequest, PaymentResult};
use async_trait::async_trait;

/// 支付方式适配器
///
/// One implementation per processor payment method, registered by id.
#[async_trait]
pub trait PaymentMethodAdapter: Send + Sync {
    /// 支付方式ID，如 `yuansfer_creditcard`
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    /// 图标HTML
    fn icon(&self) -> String;

    fn is_available(&self) -> bool;

    /// 渲染结账页面的支付字段
    async fn render_fields(&self, context: &CheckoutContext) -> DomainResult<String>;

    /// 将订单转换为支付请求
    fn build_request(&self, order: &Order) -> PaymentRequest;

    /// 处理一次结账提交
    ///
    /// Processor failures resolve to `PaymentResult::Failure`; validation
    /// and transport errors are returned as `Err`.
    async fn submit(
        &self,
        order_id: u64,
        retry: bool,
        force_save_source: bool,
    ) -> DomainResult<PaymentResult>;
}
