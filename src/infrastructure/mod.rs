pub mod adapters;
pub mod config;

pub use adapters::{InMemoryOrderRepository, MySqlOrderRepository, SessionNotifier, YuansferApiAdapter};
pub use config::{MethodSettings, ServerConfig, YuansferConfig};
