//! Mail-sender contract.
//!
//! The API crate provides the real SMTP implementation; [`MockMailSender`]
//! backs unit tests and local development. The dispatch engine treats every
//! [`MailError`] as a best-effort delivery failure: logged, never propagated.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// Errors a mail transport can produce.
#[derive(Debug, Error)]
pub enum MailError {
    /// The recipient address is empty or could not be parsed.
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    /// The transport accepted the message but failed to deliver it.
    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Fire-and-forget delivery of a single email message.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Mock mail sender for development and testing.
///
/// Records sent messages instead of delivering them. Rejects an empty
/// recipient the same way the real transport does, and can be configured to
/// fail every send.
#[derive(Debug, Default)]
pub struct MockMailSender {
    simulate_failure: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock sender that fails every send attempt.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Number of send attempts, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of messages accepted so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Copy of the accepted messages as `(to, subject, body)` tuples.
    pub fn sent_messages(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if to.is_empty() {
            return Err(MailError::InvalidAddress("empty recipient".to_string()));
        }

        if self.simulate_failure {
            tracing::warn!(to = %to, subject = %subject, "Mock mail sender simulating failure");
            return Err(MailError::SendFailed("simulated failure".to_string()));
        }

        tracing::info!(to = %to, subject = %subject, "Mock: would send email");
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}
