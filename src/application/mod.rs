pub mod checkout_service;
pub mod context;
pub mod creditcard;
pub mod dto;
pub mod event_bus;
pub mod helpers;
pub mod payment_method;
pub mod registry;

pub use checkout_service::CheckoutService;
pub use context::{CheckoutContext, CheckoutPage, FieldsQuery};
pub use creditcard::{CreditCardAdapter, CREDITCARD_METHOD_ID};
pub use dto::{ErrorResponse, PaymentMethodSummary, ProcessPaymentResponse};
pub use event_bus::EventBus;
pub use payment_method::PaymentMethodAdapter;
pub use registry::PaymentMethodRegistry;
