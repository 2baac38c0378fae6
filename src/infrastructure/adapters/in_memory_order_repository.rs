use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::Order;
use crate::ports::order_repository_port::OrderRepositoryPort;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 内存订单仓储
///
/// Used by tests and local runs without a store database.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<u64, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an order as if the store had created it.
    pub async fn insert(&self, mut order: Order) {
        order.mark_saved();
        self.orders.write().await.insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepositoryPort for InMemoryOrderRepository {
    async fn find_by_id(&self, id: u64) -> DomainResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_by_order_key(&self, order_key: &str) -> DomainResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().find(|o| o.order_key == order_key).cloned())
    }

    async fn save(&self, order: &mut Order) -> DomainResult<()> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(&order.id)
            .ok_or_else(|| DomainError::OrderNotFound(order.id.to_string()))?;

        for (key, value) in order.pending_meta() {
            stored.meta.insert(key.to_string(), value.to_string());
        }
        stored.notes.extend(order.pending_notes().cloned().map(|mut note| {
            note.unsaved = false;
            note
        }));

        order.mark_saved();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_persists_meta_and_notes() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(Order::new(1, "key_1", dec!(5))).await;

        let mut order = repo.find_by_id(1).await.unwrap().unwrap();
        order.update_meta("_yuansfer_response", "{}");
        order.add_note("hello");
        repo.save(&mut order).await.unwrap();

        let stored = repo.find_by_order_key("key_1").await.unwrap().unwrap();
        assert_eq!(stored.get_meta("_yuansfer_response"), Some("{}"));
        assert_eq!(stored.notes.len(), 1);
        assert!(!stored.notes[0].unsaved);
    }

    #[tokio::test]
    async fn test_save_keeps_concurrent_store_changes() {
        let repo = InMemoryOrderRepository::new();
        let mut seeded = Order::new(20, "key_20", dec!(5));
        seeded.update_meta("_billing_phone", "555-0100");
        repo.insert(seeded).await;

        let mut order = repo.find_by_id(20).await.unwrap().unwrap();

        // 结账处理期间商店修改了另一个元数据
        let mut concurrent = repo.find_by_id(20).await.unwrap().unwrap();
        concurrent.update_meta("_billing_phone", "555-0199");
        repo.save(&mut concurrent).await.unwrap();

        order.update_meta("_yuansfer_response", "{}");
        repo.save(&mut order).await.unwrap();

        let stored = repo.find_by_id(20).await.unwrap().unwrap();
        assert_eq!(stored.get_meta("_billing_phone"), Some("555-0199"));
        assert_eq!(stored.get_meta("_yuansfer_response"), Some("{}"));
    }

    #[tokio::test]
    async fn test_second_save_does_not_duplicate_notes() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(Order::new(2, "key_2", dec!(5))).await;

        let mut order = repo.find_by_id(2).await.unwrap().unwrap();
        order.add_note("error: card declined");
        repo.save(&mut order).await.unwrap();
        repo.save(&mut order).await.unwrap();

        assert!(order.pending_notes().next().is_none());
        let stored = repo.find_by_id(2).await.unwrap().unwrap();
        assert_eq!(stored.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_save_unknown_order() {
        let repo = InMemoryOrderRepository::new();
        let err = repo
            .save(&mut Order::new(9, "k", dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::OrderNotFound(_)));
    }
}
