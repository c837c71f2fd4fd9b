//! Client side of the contact form: field state, submission and the
//! notification shown to the visitor afterwards.

pub use api::{ContactApi, ContactRequest, HttpContactApi};
#[cfg(any(test, feature = "mock"))]
pub use api::MockContactApi;
pub use form::{ContactField, ContactForm, ContactFormError, FormState, Notification};

mod api;
mod form;
