//! SMTP mailer adapter.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use worknest_types::{Mailer, MailerError};

/// Mailer backed by an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Connects the relay transport. TLS parameters come from the relay
    /// defaults for the given host.
    pub fn new(host: &str, user: &str, pass: &str, from: &str) -> anyhow::Result<Self> {
        let creds = Credentials::new(user.to_string(), pass.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: from.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| MailerError::Address(format!("from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailerError::Address(format!("to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        Ok(())
    }
}
