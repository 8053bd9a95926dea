//! Outbound mail port.

use crate::error::MailerError;

/// Port trait for transactional mail delivery.
///
/// Implementations own the transport details (SMTP relay, API provider);
/// callers only hand over a composed message.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Sends a plaintext email.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}
