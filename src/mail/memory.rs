use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Email, MailError, Mailer};

/// In-memory [`Mailer`] for development and testing.
///
/// Messages are stored in a `Vec` behind a mutex instead of being
/// delivered. Not durable — everything is lost on restart.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<Email>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message recorded so far, in send order.
    pub async fn sent(&self) -> Vec<Email> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let mut sent = self.sent.lock().await;
        sent.push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_messages_in_order() {
        let mailer = MemoryMailer::new();

        for subject in ["first", "second"] {
            let email = Email::builder()
                .to("a@b.com")
                .subject(subject)
                .text("body")
                .build()
                .unwrap();
            mailer.send(&email).await.unwrap();
        }

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "first");
        assert_eq!(sent[1].subject, "second");
    }

    #[tokio::test]
    async fn starts_empty() {
        let mailer = MemoryMailer::new();
        assert!(mailer.sent().await.is_empty());
    }
}
