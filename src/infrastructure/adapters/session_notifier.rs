use crate::domain::errors::DomainResult;
use crate::ports::notifier_port::{Notice, NotifierPort};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// 会话提示收集器
///
/// Notices are held per order until the checkout response drains them.
/// Failed-order emails are handed to the store's mailer through the log.
#[derive(Default, Clone)]
pub struct SessionNotifier {
    notices: Arc<Mutex<HashMap<u64, Vec<Notice>>>>,
}

impl SessionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the notices queued for `order_id`.
    pub async fn take_notices(&self, order_id: u64) -> Vec<Notice> {
        self.notices.lock().await.remove(&order_id).unwrap_or_default()
    }
}

#[async_trait]
impl NotifierPort for SessionNotifier {
    async fn add_notice(&self, order_id: u64, notice: Notice) {
        self.notices
            .lock()
            .await
            .entry(order_id)
            .or_default()
            .push(notice);
    }

    async fn send_failed_order_email(&self, order_id: u64) -> DomainResult<()> {
        info!(order_id, email = "failed_order", "Sending failed order email");
        Ok(())
    }
}
