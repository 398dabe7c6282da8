/// Outbound email abstraction
///
/// The auth workflow only ever sends one kind of email: the OTP
/// verification code issued at signup. The [`Mailer`] trait is the seam
/// between that workflow and the delivery mechanism:
///
/// - [`SmtpMailer`]: real delivery over SMTP (production)
/// - [`LogMailer`]: writes the code to the log (development, no SMTP config)
/// - [`InMemoryMailer`]: records messages for inspection (tests)
///
/// Delivery is synchronous from the caller's perspective; a failed send
/// propagates as an error rather than being silently swallowed.

pub mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::sync::Mutex;

/// Error type for outbound mail operations
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Recipient or sender address could not be parsed
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Message construction failed
    #[error("Failed to build email: {0}")]
    BuildError(String),

    /// Transport-level delivery failure
    #[error("Failed to send email: {0}")]
    SendError(String),
}

/// Sends transactional email on behalf of the auth workflow
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a one-time verification code to `to`
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailError>;
}

/// An email captured by [`InMemoryMailer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address
    pub to: String,

    /// The OTP code carried in the message body
    pub code: String,
}

/// Mailer that records messages instead of delivering them
///
/// Used by tests to assert on dispatch counts and contents.
#[derive(Debug, Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message sent so far
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }

    /// Number of messages sent so far
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mailer lock poisoned").len()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock poisoned").push(OutboundEmail {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }
}

/// Mailer that logs the code instead of delivering it
///
/// Stands in for SMTP in development environments without mail credentials.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailError> {
        tracing::info!(recipient = %to, "OTP email (log-only delivery): your code is {}", code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_mailer_records_messages() {
        let mailer = InMemoryMailer::new();
        assert_eq!(mailer.sent_count(), 0);

        mailer.send_otp("a@example.com", "123456").await.unwrap();
        mailer.send_otp("b@example.com", "654321").await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[0].code, "123456");
        assert_eq!(sent[1].to, "b@example.com");
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer;
        assert!(mailer.send_otp("a@example.com", "123456").await.is_ok());
    }
}
