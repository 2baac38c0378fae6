use crate::domain::value_objects::{CurrencyCode, OrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 订单元数据：Yuansfer 客户号
pub const META_CUSTOMER_ID: &str = "_yuansfer_customer_id";

/// 订单元数据：Yuansfer 原始响应
pub const META_RESPONSE: &str = "_yuansfer_response";

/// 账单信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

/// 订单备注
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub content: String,
    pub added_at: DateTime<Utc>,
    /// 新增且尚未写入存储
    #[serde(skip)]
    pub unsaved: bool,
}

/// 宿主商店的订单
///
/// Owned by the store. Checkout code reads it, appends metadata and notes,
/// and hands it back to the repository to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 订单ID
    pub id: u64,

    /// 订单密钥（用于顾客支付链接）
    pub order_key: String,

    /// 货币，未设置时使用商店默认货币
    pub currency: Option<CurrencyCode>,

    /// 订单总额（主单位）
    pub total: Decimal,

    /// 本地顾客ID（游客为空）
    pub customer_id: Option<u64>,

    /// 订单状态
    pub status: OrderStatus,

    /// 账单信息
    pub billing: BillingDetails,

    /// 元数据
    pub meta: BTreeMap<String, String>,

    /// 订单备注
    pub notes: Vec<OrderNote>,

    /// 本次修改过、尚未写入存储的元数据键
    #[serde(skip)]
    pub dirty_meta: BTreeSet<String>,
}

impl Order {
    pub fn new(id: u64, order_key: impl Into<String>, total: Decimal) -> Self {
        Self {
            id,
            order_key: order_key.into(),
            currency: None,
            total,
            customer_id: None,
            status: OrderStatus::Pending,
            billing: BillingDetails::default(),
            meta: BTreeMap::new(),
            notes: Vec::new(),
            dirty_meta: BTreeSet::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl AsRef<str>) -> Self {
        self.currency = Some(CurrencyCode::new(currency));
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_customer(mut self, customer_id: u64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_billing(mut self, billing: BillingDetails) -> Self {
        self.billing = billing;
        self
    }

    /// Empty values read as absent.
    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Sets a metadata entry and marks it for the next save.
    pub fn update_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.dirty_meta.insert(key.clone());
        self.meta.insert(key, value.into());
    }

    /// Metadata entries changed since the order was loaded or last saved.
    pub fn pending_meta(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dirty_meta.iter().filter_map(|key| {
            self.meta
                .get_key_value(key)
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }

    pub fn pending_notes(&self) -> impl Iterator<Item = &OrderNote> {
        self.notes.iter().filter(|note| note.unsaved)
    }

    /// 标记所有修改已写入存储
    pub fn mark_saved(&mut self) {
        self.dirty_meta.clear();
        for note in &mut self.notes {
            note.unsaved = false;
        }
    }

    pub fn yuansfer_customer_id(&self) -> Option<&str> {
        self.get_meta(META_CUSTOMER_ID)
    }

    pub fn add_note(&mut self, content: impl Into<String>) {
        self.notes.push(OrderNote {
            content: content.into(),
            added_at: Utc::now(),
            unsaved: true,
        });
    }

    pub fn has_status(&self, statuses: &[OrderStatus]) -> bool {
        statuses.contains(&self.status)
    }
}

/// 注册到 Yuansfer 的客户信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub street: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country_code: String,
}

impl OwnerDetails {
    pub fn from_order(order: &Order) -> Self {
        let billing = &order.billing;
        Self {
            first_name: billing.first_name.clone(),
            last_name: billing.last_name.clone(),
            email: billing.email.clone(),
            phone: billing.phone.clone(),
            company: billing.company.clone(),
            street: billing.address_1.clone(),
            street2: billing.address_2.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            zip: billing.postcode.clone(),
            country_code: billing.country.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new(42, "wc_order_abc", dec!(10.00));

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.currency.is_none());
        assert!(order.yuansfer_customer_id().is_none());
        assert!(order.notes.is_empty());
    }

    #[test]
    fn test_empty_meta_reads_as_absent() {
        let mut order = Order::new(1, "k", dec!(1));
        order.update_meta(META_CUSTOMER_ID, "");
        assert!(order.yuansfer_customer_id().is_none());

        order.update_meta(META_CUSTOMER_ID, "cus_1");
        assert_eq!(order.yuansfer_customer_id(), Some("cus_1"));
    }

    #[test]
    fn test_add_note_marks_unsaved() {
        let mut order = Order::new(1, "k", dec!(1));
        order.add_note("error: card declined");

        assert_eq!(order.notes.len(), 1);
        assert_eq!(order.notes[0].content, "error: card declined");
        assert!(order.notes[0].unsaved);
    }

    #[test]
    fn test_only_updated_meta_is_pending() {
        let mut order = Order::new(1, "k", dec!(1));
        order.meta.insert("_billing_phone".to_string(), "555-0100".to_string());
        order.update_meta(META_RESPONSE, "{}");
        order.add_note("saved later");

        let pending: Vec<_> = order.pending_meta().collect();
        assert_eq!(pending, vec![(META_RESPONSE, "{}")]);
        assert_eq!(order.pending_notes().count(), 1);

        order.mark_saved();
        assert_eq!(order.pending_meta().count(), 0);
        assert_eq!(order.pending_notes().count(), 0);
        assert_eq!(order.get_meta(META_RESPONSE), Some("{}"));
    }

    #[test]
    fn test_has_status() {
        let order = Order::new(1, "k", dec!(1)).with_status(OrderStatus::OnHold);
        assert!(!order.has_status(&[OrderStatus::Pending, OrderStatus::Failed]));
        assert!(order.has_status(&[OrderStatus::OnHold]));
    }

    #[test]
    fn test_owner_details_from_billing() {
        let order = Order::new(1, "k", dec!(1)).with_billing(BillingDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            postcode: "94105".to_string(),
            country: "US".to_string(),
            ..Default::default()
        });

        let owner = OwnerDetails::from_order(&order);
        assert_eq!(owner.first_name, "Ada");
        assert_eq!(owner.zip, "94105");
        assert_eq!(owner.country_code, "US");
    }
}
