use crate::domain::{Order, PaymentEvent, PaymentRequest};

/// 请求修改器：在请求发出前按注册顺序调用
pub trait RequestMutator: Send + Sync {
    fn mutate(&self, request: &mut PaymentRequest, order: &Order);
}

impl<F> RequestMutator for F
where
    F: Fn(&mut PaymentRequest, &Order) + Send + Sync,
{
    fn mutate(&self, request: &mut PaymentRequest, order: &Order) {
        self(request, order)
    }
}

/// 事件订阅者
pub trait EventSubscriber: Send + Sync {
    fn on_event(&self, event: &PaymentEvent);
}

impl<F> EventSubscriber for F
where
    F: Fn(&PaymentEvent) + Send + Sync,
{
    fn on_event(&self, event: &PaymentEvent) {
        self(event)
    }
}
