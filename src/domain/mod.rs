pub mod entities;
pub mod errors;
pub mod events;
pub mod payment;
pub mod value_objects;

pub use entities::{BillingDetails, Order, OrderNote, OwnerDetails, META_CUSTOMER_ID, META_RESPONSE};
pub use errors::{DomainError, DomainResult};
pub use events::*;
pub use payment::{PaymentRequest, PaymentResult};
pub use value_objects::{CurrencyCode, MinorAmount, OrderStatus};
