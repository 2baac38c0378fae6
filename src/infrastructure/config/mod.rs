pub mod yuansfer_config;

pub use yuansfer_config::{MethodSettings, ServerConfig, YuansferConfig};
