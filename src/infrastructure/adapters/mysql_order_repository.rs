use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{BillingDetails, CurrencyCode, Order, OrderNote, OrderStatus};
use crate::ports::order_repository_port::OrderRepositoryPort;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySql, Pool};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// MySQL 订单仓储实现（商店的 HPOS 订单表）
#[derive(Clone)]
pub struct MySqlOrderRepository {
    pool: Arc<Pool<MySql>>,
    prefix: String,
}

impl MySqlOrderRepository {
    /// `prefix` is the store's table prefix, e.g. `wp_`.
    pub fn new(pool: Arc<Pool<MySql>>, prefix: impl Into<String>) -> DomainResult<Self> {
        let prefix = prefix.into();
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::Configuration(format!(
                "invalid table prefix: {prefix}"
            )));
        }
        Ok(Self { pool, prefix })
    }

    fn table(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    async fn find_where(&self, condition: &str, value: String) -> DomainResult<Option<Order>> {
        let query = format!(
            r#"
            SELECT o.id, o.status, o.currency, o.total_amount, o.customer_id, od.order_key
            FROM {orders} o
            LEFT JOIN {operational} od ON od.order_id = o.id
            WHERE o.type = 'shop_order' AND {condition}
            "#,
            orders = self.table("wc_orders"),
            operational = self.table("wc_order_operational_data"),
        );

        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut order = row.into_order()?;
        order.billing = self.load_billing(order.id).await?;
        order.meta = self.load_meta(order.id).await?;
        order.notes = self.load_notes(order.id).await?;
        Ok(Some(order))
    }

    async fn load_billing(&self, order_id: u64) -> DomainResult<BillingDetails> {
        let query = format!(
            r#"
            SELECT first_name, last_name, company, email, phone, address_1, address_2,
                   city, state, postcode, country
            FROM {}
            WHERE order_id = ? AND address_type = 'billing'
            "#,
            self.table("wc_order_addresses")
        );

        let row = sqlx::query_as::<_, AddressRow>(&query)
            .bind(order_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(AddressRow::into_billing).unwrap_or_default())
    }

    async fn load_meta(&self, order_id: u64) -> DomainResult<BTreeMap<String, String>> {
        let query = format!(
            "SELECT meta_key, meta_value FROM {} WHERE order_id = ? ORDER BY id",
            self.table("wc_orders_meta")
        );

        let rows: Vec<(Option<String>, Option<String>)> = sqlx::query_as(&query)
            .bind(order_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(key, value)| key.map(|k| (k, value.unwrap_or_default())))
            .collect())
    }

    async fn load_notes(&self, order_id: u64) -> DomainResult<Vec<OrderNote>> {
        let query = format!(
            r#"
            SELECT comment_content, comment_date_gmt
            FROM {}
            WHERE comment_post_ID = ? AND comment_type = 'order_note'
            ORDER BY comment_ID
            "#,
            self.table("comments")
        );

        let rows: Vec<(String, chrono::NaiveDateTime)> = sqlx::query_as(&query)
            .bind(order_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(content, date)| OrderNote {
                content,
                added_at: date.and_utc(),
                unsaved: false,
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepositoryPort for MySqlOrderRepository {
    /// 根据ID查找订单
    async fn find_by_id(&self, id: u64) -> DomainResult<Option<Order>> {
        self.find_where("o.id = ?", id.to_string()).await
    }

    /// 根据订单密钥查找
    async fn find_by_order_key(&self, order_key: &str) -> DomainResult<Option<Order>> {
        self.find_where("od.order_key = ?", order_key.to_string()).await
    }

    /// 保存本次修改的元数据与新增备注
    async fn save(&self, order: &mut Order) -> DomainResult<()> {
        let meta_table = self.table("wc_orders_meta");
        let mut tx = self.pool.begin().await?;

        for (key, value) in order.pending_meta() {
            // 与 load_meta 一致：同名多行时以最新一行为准
            let existing: Option<(u64,)> = sqlx::query_as(&format!(
                "SELECT id FROM {meta_table} WHERE order_id = ? AND meta_key = ? ORDER BY id DESC LIMIT 1"
            ))
            .bind(order.id)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;

            match existing {
                Some((meta_id,)) => {
                    sqlx::query(&format!("UPDATE {meta_table} SET meta_value = ? WHERE id = ?"))
                        .bind(value)
                        .bind(meta_id)
                        .execute(&mut *tx)
                        .await?;
                }
                None => {
                    sqlx::query(&format!(
                        "INSERT INTO {meta_table} (order_id, meta_key, meta_value) VALUES (?, ?, ?)"
                    ))
                    .bind(order.id)
                    .bind(key)
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        let comments = self.table("comments");
        for note in order.pending_notes() {
            let date = note.added_at.naive_utc();
            sqlx::query(&format!(
                r#"
                INSERT INTO {comments} (
                    comment_post_ID, comment_author, comment_author_email, comment_content,
                    comment_date, comment_date_gmt, comment_approved, comment_agent, comment_type
                ) VALUES (?, 'WooCommerce', '', ?, ?, ?, '1', 'WooCommerce', 'order_note')
                "#
            ))
            .bind(order.id)
            .bind(&note.content)
            .bind(date)
            .bind(date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        order.mark_saved();
        debug!("Order saved: {}", order.id);
        Ok(())
    }
}

/// 数据库行结构体
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: u64,
    status: Option<String>,
    currency: Option<String>,
    total_amount: Option<Decimal>,
    customer_id: Option<u64>,
    order_key: Option<String>,
}

impl OrderRow {
    fn into_order(self) -> DomainResult<Order> {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<OrderStatus>().map_err(DomainError::Internal)?,
            None => {
                warn!("Order {} has no status, treating as pending", self.id);
                OrderStatus::Pending
            }
        };

        Ok(Order {
            id: self.id,
            order_key: self.order_key.unwrap_or_default(),
            currency: self
                .currency
                .map(CurrencyCode::new)
                .filter(|c| !c.is_empty()),
            total: self.total_amount.unwrap_or_default(),
            customer_id: self.customer_id.filter(|id| *id != 0),
            status,
            billing: BillingDetails::default(),
            meta: BTreeMap::new(),
            notes: Vec::new(),
            dirty_meta: BTreeSet::new(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    first_name: Option<String>,
    last_name: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address_1: Option<String>,
    address_2: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

impl AddressRow {
    fn into_billing(self) -> BillingDetails {
        BillingDetails {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address_1: self.address_1.unwrap_or_default(),
            address_2: self.address_2.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            postcode: self.postcode.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        }
    }
}
