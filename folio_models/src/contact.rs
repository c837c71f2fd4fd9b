use crate::{email_address::EmailAddress, macros::nutype_string};

/// A single message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub project: ContactProject,
}

nutype_string!(
    /// Display name of the person submitting the contact form
    ContactName(sanitize(trim), validate(not_empty))
);

nutype_string!(
    /// Free-text project description, forwarded verbatim as the email body
    ContactProject(validate(predicate = |project| !project.trim().is_empty()))
);
