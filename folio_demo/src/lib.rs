//! Fixtures shared by the tests of the other crates.

use std::sync::LazyLock;

use folio_models::email_address::EmailAddress;

pub mod contact;

/// Operator mailbox that receives contact messages.
pub static OWNER_EMAIL: LazyLock<EmailAddress> =
    LazyLock::new(|| "owner@example.com".parse().unwrap());

/// Origin of the website that hosts the contact form.
pub const ALLOWED_ORIGIN: &str = "https://portfolio.example.com";
