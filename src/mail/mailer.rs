//! Mailer trait and SMTP implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Severity};
use lettre::transport::smtp;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Email, EmailBody, MailError};

/// Async email sending trait.
///
/// The handlers only ever see this trait, so tests can substitute an
/// in-memory or failing backend.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// SMTP-based mailer using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a relay client for `host` authenticating as `user`.
    ///
    /// The account address doubles as the message sender. Uses STARTTLS on
    /// the submission port, which is what Gmail expects.
    pub fn new(host: &str, user: String, password: String) -> Result<Self, MailError> {
        let from: Mailbox = user
            .parse()
            .map_err(|_| MailError::InvalidAddress(user.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Connect(e.to_string()))?
            .credentials(Credentials::new(user, password))
            .timeout(Some(Duration::from_secs(10)))
            .build();

        Ok(Self {
            transport: Arc::new(transport),
            from,
        })
    }

    /// Build a lettre Message from our Email type.
    fn build_message(&self, email: &Email) -> Result<Message, MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject);

        let message = match &email.body {
            EmailBody::Text(text) => builder
                .body(text.clone())
                .map_err(|e| MailError::Build(e.to_string()))?,
            EmailBody::Html(html) => builder
                .singlepart(SinglePart::html(html.clone()))
                .map_err(|e| MailError::Build(e.to_string()))?,
            EmailBody::Multipart { text, html } => builder
                .multipart(MultiPart::alternative_plain_html(text.clone(), html.clone()))
                .map_err(|e| MailError::Build(e.to_string()))?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(classify_smtp_error)?;

        Ok(())
    }
}

/// Map lettre's SMTP error onto our typed kinds.
///
/// 53x permanent codes are the credential rejections (530 auth required,
/// 534/535 bad credentials). An error with no status code at all means the
/// SMTP dialogue never happened, so the network is the problem.
fn classify_smtp_error(err: smtp::Error) -> MailError {
    match err.status() {
        Some(code)
            if matches!(code.severity, Severity::PermanentNegativeCompletion)
                && matches!(code.category, Category::Unspecified3) =>
        {
            MailError::Auth(err.to_string())
        }
        Some(_) => MailError::Transport(err.to_string()),
        None => MailError::Connect(err.to_string()),
    }
}
