#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use yuansfer_gateway::application::{CreditCardAdapter, EventBus};
use yuansfer_gateway::domain::{
    DomainError, DomainResult, OwnerDetails, PaymentEvent, PaymentRequest, META_CUSTOMER_ID,
};
use yuansfer_gateway::infrastructure::{InMemoryOrderRepository, SessionNotifier, YuansferConfig};
use yuansfer_gateway::ports::{Notice, NotifierPort, OrderRepositoryPort, YuansferPort};

pub const SITE_URL: &str = "https://shop.test";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SecurePay(PaymentRequest),
    CreateCustomer(Option<u64>),
    UpdateCustomer(String),
}

/// How the mock answers secure-pay and customer calls.
#[derive(Debug, Clone, Default)]
pub enum Failure {
    #[default]
    None,
    /// Customer registration answers with a processor error.
    Customer(String),
    /// Secure-pay fails before any response arrives.
    Transport,
}

/// Records every processor call and answers with canned responses.
pub struct MockYuansfer {
    pub response: String,
    pub customer_no: String,
    pub failure: Failure,
    pub calls: Mutex<Vec<Call>>,
    repository: Arc<InMemoryOrderRepository>,
    /// Stored processor customer id seen when secure-pay was called.
    pub customer_id_at_secure_pay: Mutex<Option<Option<String>>>,
}

impl MockYuansfer {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn secure_pay_requests(&self) -> Vec<PaymentRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SecurePay(r) => Some(r),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl YuansferPort for MockYuansfer {
    async fn create_secure_pay(&self, request: &PaymentRequest) -> DomainResult<String> {
        let order_id: u64 = request
            .reference
            .split(':')
            .next()
            .and_then(|id| id.parse().ok())
            .unwrap_or_default();
        let stored = self
            .repository
            .find_by_id(order_id)
            .await?
            .and_then(|o| o.get_meta(META_CUSTOMER_ID).map(String::from));
        *self.customer_id_at_secure_pay.lock().unwrap() = Some(stored);

        self.calls
            .lock()
            .unwrap()
            .push(Call::SecurePay(request.clone()));
        if let Failure::Transport = self.failure {
            let err = reqwest::Client::new()
                .post("not a url")
                .build()
                .unwrap_err();
            return Err(DomainError::Http(err));
        }
        Ok(self.response.clone())
    }

    async fn create_customer(
        &self,
        customer_id: Option<u64>,
        _owner: &OwnerDetails,
    ) -> DomainResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::CreateCustomer(customer_id));
        if let Failure::Customer(message) = &self.failure {
            return Err(DomainError::processor(message.clone()));
        }
        Ok(self.customer_no.clone())
    }

    async fn update_customer(
        &self,
        customer_no: &str,
        _owner: &OwnerDetails,
    ) -> DomainResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::UpdateCustomer(customer_no.to_string()));
        Ok(customer_no.to_string())
    }
}

/// Session notifier that also remembers which failed-order emails were sent.
#[derive(Default)]
pub struct RecordingNotifier {
    pub session: SessionNotifier,
    emails: Mutex<Vec<u64>>,
}

impl RecordingNotifier {
    pub async fn take_notices(&self, order_id: u64) -> Vec<Notice> {
        self.session.take_notices(order_id).await
    }

    pub fn failed_order_emails(&self) -> Vec<u64> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPort for RecordingNotifier {
    async fn add_notice(&self, order_id: u64, notice: Notice) {
        self.session.add_notice(order_id, notice).await;
    }

    async fn send_failed_order_email(&self, order_id: u64) -> DomainResult<()> {
        self.session.send_failed_order_email(order_id).await?;
        self.emails.lock().unwrap().push(order_id);
        Ok(())
    }
}

pub fn config(overrides: &[(&str, &str)]) -> YuansferConfig {
    let mut pairs = vec![
        ("YUANSFER_MERCHANT_NO", "200043"),
        ("YUANSFER_STORE_NO", "300014"),
        ("YUANSFER_API_TOKEN", "5cbfb079f15b150122261c8537086d77"),
        ("SITE_URL", SITE_URL),
    ];
    pairs.extend_from_slice(overrides);
    YuansferConfig::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .expect("test config")
}

pub type TestAdapter =
    CreditCardAdapter<MockYuansfer, InMemoryOrderRepository, RecordingNotifier>;

pub struct Harness {
    pub adapter: TestAdapter,
    pub yuansfer: Arc<MockYuansfer>,
    pub repository: Arc<InMemoryOrderRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: Arc<Mutex<Vec<PaymentEvent>>>,
}

pub fn harness(response: &str, overrides: &[(&str, &str)]) -> Harness {
    harness_failing(response, overrides, Failure::None)
}

pub fn harness_failing(response: &str, overrides: &[(&str, &str)], failure: Failure) -> Harness {
    let repository = Arc::new(InMemoryOrderRepository::new());
    let yuansfer = Arc::new(MockYuansfer {
        response: response.to_string(),
        customer_no: "cus_new".to_string(),
        failure,
        calls: Mutex::new(Vec::new()),
        repository: repository.clone(),
        customer_id_at_secure_pay: Mutex::new(None),
    });
    let notifier = Arc::new(RecordingNotifier::default());

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let bus = EventBus::new().subscribe(Arc::new(move |e: &PaymentEvent| {
        sink.lock().unwrap().push(e.clone())
    }));

    let adapter = CreditCardAdapter::new(
        Arc::new(config(overrides)),
        yuansfer.clone(),
        repository.clone(),
        notifier.clone(),
        Arc::new(bus),
    );

    Harness {
        adapter,
        yuansfer,
        repository,
        notifier,
        events,
    }
}
