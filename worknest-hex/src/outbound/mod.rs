//! Outbound adapters implementing the mail and gateway ports.

mod gateway;
mod mailer;

pub use gateway::RazorpayGateway;
pub use mailer::SmtpMailer;
