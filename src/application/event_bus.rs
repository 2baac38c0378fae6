use crate::domain::events::{DomainEvent, PaymentEvent};
use crate::ports::EventSubscriber;
use std::sync::Arc;
use tracing::debug;

/// 事件总线：按注册顺序通知订阅者
#[derive(Default, Clone)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(mut self, subscriber: Arc<dyn EventSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn publish(&self, event: &PaymentEvent) {
        debug!(
            "Publishing {} for order {} to {} subscriber(s)",
            event.event_type(),
            event.order_id(),
            self.subscribers.len()
        );
        for subscriber in &self.subscribers {
            subscriber.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, PaymentProcessingFailed};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[test]
    fn test_subscribers_called_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = seen.clone();
        let second = seen.clone();

        let bus = EventBus::new()
            .subscribe(Arc::new(move |e: &PaymentEvent| {
                first.lock().unwrap().push(format!("first:{}", e.order_id()))
            }))
            .subscribe(Arc::new(move |e: &PaymentEvent| {
                second.lock().unwrap().push(format!("second:{}", e.event_type()))
            }));

        let order = Order::new(3, "k", dec!(1));
        bus.publish(&PaymentEvent::ProcessingFailed(PaymentProcessingFailed::new(
            &order,
            "yuansfer_creditcard",
            "error: declined".to_string(),
        )));

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:3".to_string(), "second:PaymentProcessingFailed".to_string()]
        );
    }
}
