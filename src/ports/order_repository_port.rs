use crate::domain::errors::DomainResult;
use crate::domain::Order;
use async_trait::async_trait;

/// 宿主商店订单仓储端口接口
#[async_trait]
pub trait OrderRepositoryPort: Send + Sync {
    /// 根据ID查找订单
    async fn find_by_id(&self, id: u64) -> DomainResult<Option<Order>>;

    /// 根据订单密钥查找
    async fn find_by_order_key(&self, order_key: &str) -> DomainResult<Option<Order>>;

    /// 保存订单（元数据与新增备注）
    ///
    /// Writes only the metadata keys set through `Order::update_meta` and the
    /// unsaved notes, then marks the order as saved.
    async fn save(&self, order: &mut Order) -> DomainResult<()>;
}
