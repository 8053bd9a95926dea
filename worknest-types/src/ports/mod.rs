//! Port traits implemented by the outbound adapters.

mod gateway;
mod mailer;
mod repository;

pub use gateway::{GatewayOrder, GatewayOrderRequest, PaymentGateway};
pub use mailer::Mailer;
pub use repository::OtpRepository;
