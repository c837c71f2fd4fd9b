use folio_models::{
    contact::{ContactName, ContactProject, ContactSubmission},
    email_address::EmailAddress,
};
use serde::Deserialize;

/// Request body of `POST /api/contact`. All fields are validated while
/// deserializing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Name of the person reaching out
    pub name: ContactName,
    /// Address the site owner should reply to
    pub email: EmailAddress,
    /// Description of the project
    pub project: ContactProject,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            project: value.project,
        }
    }
}
