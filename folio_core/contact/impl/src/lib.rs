use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_email_contracts::{Email, EmailService};
use folio_models::{contact::ContactSubmission, email_address::EmailAddress};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Mailbox of the site owner, receives every contact message.
    pub email: Arc<EmailAddress>,
    /// Send the message `From` the submitter's address instead of the relay's
    /// own account. Most providers rewrite or reject such messages.
    pub impersonate_sender: bool,
}

impl<Email> ContactFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let ContactSubmission {
            name,
            email: author,
            project,
        } = submission;

        let message = Email {
            sender: self
                .config
                .impersonate_sender
                .then(|| author.clone().into()),
            recipient: (*self.config.email).clone().into(),
            subject: format!("Message from {}", *name),
            body: project.into_inner(),
            reply_to: Some(author.with_name(name.into_inner())),
        };

        if !self.email.send(message).await? {
            warn!("Mail provider rejected contact message");
            return Err(ContactSendMessageError::Send);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use folio_demo::{
        contact::{JANE, MAX},
        OWNER_EMAIL,
    };
    use folio_email_contracts::MockEmailService;

    use super::*;

    fn config(impersonate_sender: bool) -> ContactFeatureConfig {
        ContactFeatureConfig {
            email: Arc::new(OWNER_EMAIL.clone()),
            impersonate_sender,
        }
    }

    fn jane_email() -> Email {
        Email {
            sender: Some("jane@example.com".parse().unwrap()),
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Message from Jane Doe".into(),
            body: "Need a 5-page site".into(),
            reply_to: Some("Jane Doe <jane@example.com>".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new().with_send(jane_email(), true);

        let sut = ContactFeatureServiceImpl::new(email, config(true));

        // Act
        let result = sut.send_message(JANE.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_without_impersonation() {
        // Arrange
        let expected = Email {
            sender: None,
            recipient: OWNER_EMAIL.clone().into(),
            subject: "Message from Max Mustermann".into(),
            body: "Landing page with pricing table\n\nBudget: flexible, launch in Q3.".into(),
            reply_to: Some(MAX.email.clone().with_name("Max Mustermann".into())),
        };

        let email = MockEmailService::new().with_send(expected, true);

        let sut = ContactFeatureServiceImpl::new(email, config(false));

        // Act
        let result = sut.send_message(MAX.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let email = MockEmailService::new().with_send(jane_email(), false);

        let sut = ContactFeatureServiceImpl::new(email, config(true));

        // Act
        let result = sut.send_message(JANE.clone()).await;

        // Assert
        assert!(matches!(result, Err(ContactSendMessageError::Send)), "{result:?}");
    }

    #[tokio::test]
    async fn transport_error() {
        // Arrange
        let email = MockEmailService::new().with_send_error(
            jane_email(),
            anyhow!("535 5.7.8 Username and Password not accepted"),
        );

        let sut = ContactFeatureServiceImpl::new(email, config(true));

        // Act
        let result = sut.send_message(JANE.clone()).await;

        // Assert
        assert!(matches!(result, Err(ContactSendMessageError::Other(_))), "{result:?}");
    }

    #[tokio::test]
    async fn duplicate_submissions_send_twice() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .times(2)
            .with(mockall::predicate::eq(jane_email()))
            .returning(|_| Box::pin(std::future::ready(Ok(true))));

        let sut = ContactFeatureServiceImpl::new(email, config(true));

        // Act
        let first = sut.send_message(JANE.clone()).await;
        let second = sut.send_message(JANE.clone()).await;

        // Assert
        first.unwrap();
        second.unwrap();
    }
}
