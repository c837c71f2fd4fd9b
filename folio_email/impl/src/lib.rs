use std::time::Duration;

use anyhow::anyhow;
use folio_email_contracts::{Email, EmailService};
use folio_models::{email_address::EmailAddressWithName, Sensitive};
use lettre::{
    message::header, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: Sensitive<String>,
}

impl EmailServiceImpl {
    /// Creates a pooled SMTP transport for `url`
    /// (e.g. `smtps://smtp.gmail.com` or `smtp://127.0.0.1:2525`).
    ///
    /// `timeout` replaces lettre's default per-command timeout.
    pub async fn new(
        url: &str,
        from: EmailAddressWithName,
        credentials: Option<SmtpCredentials>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?;
        if let Some(SmtpCredentials { username, password }) = credentials {
            builder = builder.credentials(Credentials::new(username, password.0));
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(Some(timeout));
        }
        let transport = builder.build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        Self::new(
            "smtp://dummy",
            "dummy@example.com".parse().unwrap(),
            None,
            None,
        )
        .await
        .unwrap()
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let from = email.sender.unwrap_or_else(|| self.from.clone());

        let mut message = Message::builder()
            .from(from.0)
            .to(email.recipient.0)
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN);
        if let Some(reply_to) = email.reply_to {
            message = message.reply_to(reply_to.0);
        }
        let message = message.body(email.body)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
