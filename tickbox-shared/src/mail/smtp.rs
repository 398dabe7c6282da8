//! SMTP delivery for OTP email using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{MailError, Mailer};

/// Mailer that delivers over SMTP
///
/// A fresh transport is built per message to avoid connection pooling
/// issues; the blocking send runs on a `spawn_blocking` thread so the
/// request task is not stalled on network I/O.
#[derive(Clone)]
pub struct SmtpMailer {
    /// SMTP server address
    smtp_host: String,

    /// SMTP server port (usually 587 for TLS)
    smtp_port: u16,

    /// SMTP credentials
    credentials: Credentials,

    /// Sender email address
    from_email: String,

    /// Sender display name
    from_name: String,
}

impl SmtpMailer {
    /// Creates a new SMTP mailer
    pub fn new(
        smtp_host: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        Self {
            smtp_host,
            smtp_port,
            credentials: Credentials::new(smtp_username, smtp_password),
            from_email,
            from_name,
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport, MailError> {
        Ok(SmtpTransport::relay(&self.smtp_host)
            .map_err(|e| MailError::SendError(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| MailError::InvalidAddress(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::InvalidAddress(format!("Invalid to address: {e}")))?)
            .subject("Your OTP Code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!("Your OTP code is {code}."))
            .map_err(|e| MailError::BuildError(e.to_string()))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| MailError::SendError(e.to_string()))
        })
        .await
        .map_err(|e| MailError::SendError(format!("Email task failed: {e}")))?
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_format() {
        let mailer = SmtpMailer::new(
            "smtp.example.com".to_string(),
            587,
            "user".to_string(),
            "pass".to_string(),
            "noreply@example.com".to_string(),
            "Tickbox".to_string(),
        );

        assert_eq!(mailer.from_header(), "Tickbox <noreply@example.com>");
    }
}
