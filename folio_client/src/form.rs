use std::fmt;

use folio_models::email_address::EmailAddress;
use thiserror::Error;
use tracing::error;

use crate::{ContactApi, ContactRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Project,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Project];
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Project => "project",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
}

/// Result shown to the visitor after a submission has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Success,
    Failure,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Message sent successfully! I'll get back to you within 24 hours.",
            Self::Failure => "Failed to send message. Please try again later.",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactFormError {
    #[error("Please fill in the {0} field.")]
    MissingField(ContactField),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("A message is already being sent.")]
    AlreadySubmitting,
}

/// Fields of the contact form and whether a submission is in flight.
///
/// A submission goes through [`ContactForm::begin`], which validates the
/// fields and locks the form, and [`ContactForm::complete`], which unlocks it
/// again. While locked, further submissions are refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    project: String,
    state: FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Project => &self.project,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Project => self.project = value,
        }
    }

    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn begin(&mut self) -> Result<ContactRequest, ContactFormError> {
        if self.is_submitting() {
            return Err(ContactFormError::AlreadySubmitting);
        }

        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|&field| self.get(field).trim().is_empty())
        {
            return Err(ContactFormError::MissingField(field));
        }

        if self.email.trim().parse::<EmailAddress>().is_err() {
            return Err(ContactFormError::InvalidEmail);
        }

        self.state = FormState::Submitting;

        Ok(ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            project: self.project.clone(),
        })
    }

    /// Unlocks the form. The fields are cleared on success and kept on
    /// failure so the visitor can retry.
    pub fn complete(&mut self, outcome: anyhow::Result<()>) -> Notification {
        self.state = FormState::Idle;

        match outcome {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.project.clear();
                Notification::Success
            }
            Err(err) => {
                error!("Failed to send contact message: {err:#}");
                Notification::Failure
            }
        }
    }

    pub async fn submit(
        &mut self,
        api: &impl ContactApi,
    ) -> Result<Notification, ContactFormError> {
        let request = self.begin()?;
        let outcome = api.send(request).await;
        Ok(self.complete(outcome))
    }
}
