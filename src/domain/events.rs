use crate::domain::entities::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 领域事件trait
pub trait DomainEvent {
    fn event_type(&self) -> &'static str;
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// 支付处理失败事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProcessingFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub order_id: u64,
    pub payment_method: String,
    pub message: String,
}

impl DomainEvent for PaymentProcessingFailed {
    fn event_type(&self) -> &'static str {
        "PaymentProcessingFailed"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl PaymentProcessingFailed {
    pub fn new(order: &Order, payment_method: &str, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            order_id: order.id,
            payment_method: payment_method.to_string(),
            message,
        }
    }
}

/// 支付源创建成功事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSourceCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub order_id: u64,
    pub payment_method: String,
    pub redirect: String,
}

impl DomainEvent for PaymentSourceCreated {
    fn event_type(&self) -> &'static str {
        "PaymentSourceCreated"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl PaymentSourceCreated {
    pub fn new(order: &Order, payment_method: &str, redirect: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            order_id: order.id,
            payment_method: payment_method.to_string(),
            redirect,
        }
    }
}

/// 发布给订阅者的事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentEvent {
    ProcessingFailed(PaymentProcessingFailed),
    SourceCreated(PaymentSourceCreated),
}

impl PaymentEvent {
    pub fn order_id(&self) -> u64 {
        match self {
            PaymentEvent::ProcessingFailed(e) => e.order_id,
            PaymentEvent::SourceCreated(e) => e.order_id,
        }
    }
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::ProcessingFailed(e) => e.event_type(),
            PaymentEvent::SourceCreated(e) => e.event_type(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PaymentEvent::ProcessingFailed(e) => e.occurred_at(),
            PaymentEvent::SourceCreated(e) => e.occurred_at(),
        }
    }
}
