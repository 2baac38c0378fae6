use crate::application::context::CheckoutContext;
use crate::application::dto::PaymentMethodSummary;
use crate::application::payment_method::PaymentMethodAdapter;
use crate::application::registry::PaymentMethodRegistry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::PaymentResult;
use std::sync::Arc;
use tracing::info;

/// 结账服务
pub struct CheckoutService {
    registry: Arc<PaymentMethodRegistry>,
}

impl CheckoutService {
    pub fn new(registry: Arc<PaymentMethodRegistry>) -> Self {
        Self { registry }
    }

    fn method(&self, method_id: &str) -> DomainResult<Arc<dyn PaymentMethodAdapter>> {
        self.registry
            .get(method_id)
            .ok_or_else(|| DomainError::UnknownPaymentMethod(method_id.to_string()))
    }

    /// 可用的支付方式
    pub fn available_methods(&self) -> Vec<PaymentMethodSummary> {
        self.registry
            .available()
            .iter()
            .map(|m| PaymentMethodSummary {
                id: m.id().to_string(),
                title: m.title().to_string(),
                icon: m.icon(),
            })
            .collect()
    }

    /// 渲染支付字段
    pub async fn payment_fields(
        &self,
        method_id: &str,
        context: &CheckoutContext,
    ) -> DomainResult<String> {
        self.method(method_id)?.render_fields(context).await
    }

    /// 处理支付
    pub async fn process_payment(
        &self,
        method_id: &str,
        order_id: u64,
    ) -> DomainResult<PaymentResult> {
        info!("Processing payment for order {} with {}", order_id, method_id);
        self.method(method_id)?.submit(order_id, true, false).await
    }
}
