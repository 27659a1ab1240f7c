//! Request-boundary error taxonomy.
//!
//! Every failure terminates at the HTTP response; nothing propagates past
//! the handler. The human-readable relay message is chosen from the typed
//! [`MailError`] kind, never by matching on error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::mail::MailError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The submitted record lacked one of the required fields.
    #[error("Missing required fields: name, age, or terms not accepted")]
    MissingRequiredFields,

    /// Mail credentials are absent or still placeholders.
    #[error("Email service not configured")]
    MailNotConfigured,

    /// The relay refused or failed to deliver the message.
    #[error(transparent)]
    Mail(#[from] MailError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingRequiredFields => StatusCode::BAD_REQUEST,
            Error::MailNotConfigured | Error::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Trace server errors; the response carries a friendlier message.
        if status.is_server_error() {
            tracing::error!("Error Status {}: {}", status, self);
        }

        let body = match &self {
            Error::MissingRequiredFields => json!({
                "error": self.to_string(),
            }),
            Error::MailNotConfigured => json!({
                "error": self.to_string(),
                "details": "Set EMAIL_USER, EMAIL_PASSWORD, and RECIPIENT_EMAIL in .env",
            }),
            Error::Mail(err) => json!({
                "error": relay_failure_message(err),
                "details": err.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

fn relay_failure_message(err: &MailError) -> &'static str {
    match err {
        MailError::Auth(_) => "Email auth failed. Use a Gmail App Password.",
        MailError::Connect(_) => "Internet issue: check your connection.",
        _ => "Failed to send email.",
    }
}
