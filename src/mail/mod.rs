//! Email delivery through an SMTP relay.
//!
//! A thin abstraction over [lettre](https://lettre.rs): the [`Mailer`] trait
//! is the seam the request handlers talk to, [`SmtpMailer`] is the real
//! relay client, and [`MemoryMailer`] records messages for development and
//! testing.
//!
//! Relay failures surface as [`MailError`] with an explicit kind. Callers
//! branch on the variant, not on the text of the underlying error.

mod mailer;
mod memory;
mod message;

pub use mailer::{Mailer, SmtpMailer};
pub use memory::MemoryMailer;
pub use message::{Email, EmailBody, EmailBuilder};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    /// The relay rejected our credentials.
    #[error("SMTP authentication failed: {0}")]
    Auth(String),

    /// No usable connection to the relay (DNS, refused, timeout).
    #[error("could not reach mail relay: {0}")]
    Connect(String),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    /// Any other SMTP-level rejection.
    #[error("SMTP error: {0}")]
    Transport(String),
}
