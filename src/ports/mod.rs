pub mod extension_port;
pub mod notifier_port;
pub mod order_repository_port;
pub mod yuansfer_port;

pub use extension_port::{EventSubscriber, RequestMutator};
pub use notifier_port::{Notice, NoticeLevel, NotifierPort};
pub use order_repository_port::OrderRepositoryPort;
pub use yuansfer_port::{YuansferEndpoint, YuansferPort};
