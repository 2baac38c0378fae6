use crate::application::context::{CheckoutContext, CheckoutPage};
use crate::application::event_bus::EventBus;
use crate::application::helpers::{
    autop, clean_statement_descriptor, esc_html, minimum_order_message, redirect_url, return_url,
    unique_reference, webhook_url, yuansfer_amount,
};
use crate::application::payment_method::PaymentMethodAdapter;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{
    CurrencyCode, MinorAmount, Order, OrderStatus, OwnerDetails, PaymentEvent, PaymentProcessingFailed,
    PaymentRequest, PaymentResult, PaymentSourceCreated, META_CUSTOMER_ID, META_RESPONSE,
};
use crate::infrastructure::config::YuansferConfig;
use crate::ports::{Notice, NotifierPort, OrderRepositoryPort, RequestMutator, YuansferPort};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

pub const CREDITCARD_METHOD_ID: &str = "yuansfer_creditcard";
const VENDOR: &str = "creditcard";
const TERMINAL: &str = "ONLINE";
/// Yuansfer settles card sources in USD whatever the order currency.
const OUTER_CURRENCY: &str = "USD";

/// 信用卡支付方式
pub struct CreditCardAdapter<Y: YuansferPort, R: OrderRepositoryPort, N: NotifierPort> {
    config: Arc<YuansferConfig>,
    yuansfer: Arc<Y>,
    repository: Arc<R>,
    notifier: Arc<N>,
    events: Arc<EventBus>,
    mutators: Vec<Arc<dyn RequestMutator>>,
}

impl<Y: YuansferPort, R: OrderRepositoryPort, N: NotifierPort> CreditCardAdapter<Y, R, N> {
    pub fn new(
        config: Arc<YuansferConfig>,
        yuansfer: Arc<Y>,
        repository: Arc<R>,
        notifier: Arc<N>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            yuansfer,
            repository,
            notifier,
            events,
            mutators: Vec::new(),
        }
    }

    /// Adds a request mutator; mutators run in the order they were added.
    pub fn with_mutator(mut self, mutator: Arc<dyn RequestMutator>) -> Self {
        self.mutators.push(mutator);
        self
    }

    fn log_info(&self, message: &str) {
        if self.config.logging {
            info!("Info: {}", message);
        }
    }

    /// Order currency, else the store default.
    fn resolve_currency(&self, order: &Order) -> CurrencyCode {
        order
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.config.store_currency.clone())
    }

    /// 构建 secure-pay 请求
    pub fn build_payment_request(&self, order: &Order) -> PaymentRequest {
        let currency = self.resolve_currency(order);

        let amount = MinorAmount::from_total(order.total, &currency);
        let (amount, rmb_amount) = if currency.is_renminbi() {
            (None, Some(amount))
        } else {
            (Some(amount), None)
        };

        let mut request = PaymentRequest {
            merchant_no: self.config.merchant_no.clone(),
            store_no: self.config.store_no.clone(),
            amount,
            rmb_amount,
            currency: OUTER_CURRENCY.to_string(),
            vendor: VENDOR.to_string(),
            reference: unique_reference(order.id, VENDOR),
            ipn_url: webhook_url(&self.config.site_url),
            callback_url: return_url(&self.config.site_url, order),
            terminal: TERMINAL.to_string(),
            customer_no: order.yuansfer_customer_id().map(String::from),
            description: None,
            extra: Default::default(),
        };

        if let Some(descriptor) = &self.config.statement_descriptor {
            request.description = Some(clean_statement_descriptor(descriptor));
        }

        self.log_info("Begin creating Credit Card source");

        for mutator in &self.mutators {
            mutator.mutate(&mut request, order);
        }

        request
    }

    /// 校验最低订单金额
    fn validate_minimum_order_amount(&self, order: &Order) -> DomainResult<()> {
        let currency = self.resolve_currency(order);

        if MinorAmount::from_total(order.total, &currency) < self.config.minimum_amount {
            return Err(DomainError::Validation(minimum_order_message(
                self.config.minimum_amount,
                &currency,
            )));
        }
        Ok(())
    }

    /// 在 Yuansfer 注册或更新客户，并把客户号写入订单
    async fn sync_customer(&self, order: &mut Order) -> DomainResult<()> {
        let owner = OwnerDetails::from_order(order);
        let customer_no = match order.yuansfer_customer_id() {
            None => {
                self.yuansfer
                    .create_customer(order.customer_id, &owner)
                    .await?
            }
            Some(existing) => self.yuansfer.update_customer(existing, &owner).await?,
        };

        order.update_meta(META_CUSTOMER_ID, customer_no);
        self.repository.save(order).await
    }

    async fn create_payment(&self, order: &mut Order) -> DomainResult<PaymentResult> {
        if self.config.create_account {
            self.sync_customer(order).await?;
        }

        let request = self.build_payment_request(order);
        let response = self.yuansfer.create_secure_pay(&request).await?;

        if response.starts_with("error") {
            order.add_note(response.clone());
            self.repository.save(order).await?;
            return Err(DomainError::processor(response));
        }

        order.update_meta(META_RESPONSE, response);
        self.repository.save(order).await?;

        self.log_info("Redirecting to Credit Card...");

        let redirect = redirect_url(&self.config.site_url, order.id);
        self.events
            .publish(&PaymentEvent::SourceCreated(PaymentSourceCreated::new(
                order,
                CREDITCARD_METHOD_ID,
                redirect.clone(),
            )));

        Ok(PaymentResult::success(redirect))
    }

    /// Turns a processor error into a failed checkout result.
    async fn handle_processor_error(&self, order: &Order, err: DomainError) -> PaymentResult {
        self.notifier
            .add_notice(order.id, Notice::error(err.localized_message()))
            .await;

        let message = match &err {
            DomainError::Processor { message, .. } => message.clone(),
            other => other.to_string(),
        };
        error!("Error: {}", message);

        self.events
            .publish(&PaymentEvent::ProcessingFailed(PaymentProcessingFailed::new(
                order,
                CREDITCARD_METHOD_ID,
                message,
            )));

        if order.has_status(&[OrderStatus::Pending, OrderStatus::Failed]) {
            if let Err(e) = self.notifier.send_failed_order_email(order.id).await {
                error!("Error: failed order email for {}: {}", order.id, e);
            }
        }

        PaymentResult::failure()
    }
}

#[async_trait]
impl<Y, R, N> PaymentMethodAdapter for CreditCardAdapter<Y, R, N>
where
    Y: YuansferPort + 'static,
    R: OrderRepositoryPort + 'static,
    N: NotifierPort + 'static,
{
    fn id(&self) -> &str {
        CREDITCARD_METHOD_ID
    }

    fn title(&self) -> &str {
        &self.config.creditcard.title
    }

    fn icon(&self) -> String {
        format!(
            r#"<img src="{}/assets/images/creditcard.svg" class="yuansfer-creditcard-icon yuansfer-icon" alt="Credit Card" />"#,
            esc_html(&self.config.site_url)
        )
    }

    fn is_available(&self) -> bool {
        self.config.creditcard.enabled
    }

    async fn render_fields(&self, context: &CheckoutContext) -> DomainResult<String> {
        let mut total = context.cart_total;

        // Paying for an existing order uses the order total, not the cart.
        if let CheckoutPage::PayForOrder { order_key } = &context.page {
            if let Some(order) = self.repository.find_by_order_key(order_key).await? {
                total = Some(order.total);
            }
        }

        if context.page == CheckoutPage::AddPaymentMethod {
            total = None;
        }

        let currency = &self.config.store_currency;
        let mut html = format!(
            r#"<div id="yuansfer-creditcard-payment-data" data-amount="{}" data-currency="{}">"#,
            esc_html(&yuansfer_amount(total, currency)),
            esc_html(&currency.to_lowercase())
        );

        if let Some(description) = &self.config.creditcard.description {
            html.push_str(&autop(description));
        }

        html.push_str("</div>");
        Ok(html)
    }

    fn build_request(&self, order: &Order) -> PaymentRequest {
        self.build_payment_request(order)
    }

    async fn submit(
        &self,
        order_id: u64,
        _retry: bool,
        _force_save_source: bool,
    ) -> DomainResult<PaymentResult> {
        let mut order = self
            .repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))?;

        self.validate_minimum_order_amount(&order)?;

        match self.create_payment(&mut order).await {
            Ok(result) => Ok(result),
            Err(err @ DomainError::Processor { .. }) => {
                Ok(self.handle_processor_error(&order, err).await)
            }
            Err(other) => Err(other),
        }
    }
}
