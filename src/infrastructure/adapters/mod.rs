pub mod in_memory_order_repository;
pub mod mysql_order_repository;
pub mod session_notifier;
pub mod yuansfer_api_adapter;

pub use in_memory_order_repository::InMemoryOrderRepository;
pub use mysql_order_repository::MySqlOrderRepository;
pub use session_notifier::SessionNotifier;
pub use yuansfer_api_adapter::YuansferApiAdapter;
