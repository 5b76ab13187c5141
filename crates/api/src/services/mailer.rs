//! Email delivery behind the domain [`MailSender`] contract.
//!
//! Supported providers:
//! - `console`: Logs emails instead of sending them (development)
//! - `smtp`: Sends via an SMTP server using STARTTLS
//!
//! A disabled service short-circuits every send to success; delivery is
//! best-effort end to end, so callers only observe outcomes through logs
//! and the email failure counter.

use std::sync::Arc;

use async_trait::async_trait;
use domain::services::{MailError, MailSender};
use tracing::{debug, error, info};

use crate::config::EmailConfig;
use crate::middleware::metrics::record_email_send_failure;

/// Email sender for transactional notification messages.
#[derive(Clone)]
pub struct EmailSender {
    config: Arc<EmailConfig>,
}

impl EmailSender {
    /// Creates a new EmailSender with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email sending is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Console provider - logs email instead of sending (for development).
    async fn send_console(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        info!(
            to = %to,
            subject = %subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );
        debug!(body = %body, "Email body");

        Ok(())
    }

    /// SMTP provider - sends via SMTP server with STARTTLS.
    async fn send_smtp(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        if self.config.smtp_host.is_empty() {
            return Err(MailError::SendFailed(
                "SMTP host not configured".to_string(),
            ));
        }

        let from = format!("{} <{}>", self.config.sender_name, self.config.sender_email)
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("sender: {}", e)))?;
        let to_mailbox = to
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", to, e)))?;

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::SendFailed(format!("message build failed: {}", e)))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
                .map_err(|e| MailError::SendFailed(e.to_string()))?
                .port(self.config.smtp_port);

        if !self.config.smtp_username.is_empty() && !self.config.smtp_password.is_empty() {
            transport_builder = transport_builder.credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            ));
        }

        let transport = transport_builder.build();
        transport
            .send(email)
            .await
            .map_err(|e| MailError::SendFailed(e.to_string()))?;

        info!(to = %to, subject = %subject, "Email sent via SMTP");
        Ok(())
    }
}

#[async_trait]
impl MailSender for EmailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if !self.config.enabled {
            debug!(to = %to, subject = %subject, "Email sending disabled, skipping send");
            return Ok(());
        }

        if to.is_empty() {
            record_email_send_failure();
            return Err(MailError::InvalidAddress("empty recipient".to_string()));
        }

        let result = match self.config.provider.as_str() {
            "console" => self.send_console(to, subject, body).await,
            "smtp" => self.send_smtp(to, subject, body).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(MailError::SendFailed(format!(
                    "unknown email provider: {}",
                    provider
                )))
            }
        };

        if result.is_err() {
            record_email_send_failure();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            sender_email: "test@example.com".to_string(),
            sender_name: "Test".to_string(),
        }
    }

    #[test]
    fn test_email_sender_creation() {
        let sender = EmailSender::new(test_config());
        assert!(sender.is_enabled());
    }

    #[test]
    fn test_email_sender_disabled() {
        let mut config = test_config();
        config.enabled = false;
        let sender = EmailSender::new(config);
        assert!(!sender.is_enabled());
    }

    #[tokio::test]
    async fn test_send_console_email() {
        let sender = EmailSender::new(test_config());

        let result = sender
            .send_mail("user@example.com", "Test Subject", "Test body")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = test_config();
        config.enabled = false;
        let sender = EmailSender::new(config);

        let result = sender.send_mail("user@example.com", "Test", "Test").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_empty_recipient_rejected() {
        let sender = EmailSender::new(test_config());

        let result = sender.send_mail("", "Test", "Test").await;
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_send_unknown_provider_fails() {
        let mut config = test_config();
        config.provider = "carrier-pigeon".to_string();
        let sender = EmailSender::new(config);

        let result = sender.send_mail("user@example.com", "Test", "Test").await;
        assert!(matches!(result, Err(MailError::SendFailed(_))));
    }

    #[tokio::test]
    async fn test_send_smtp_without_host_fails() {
        let mut config = test_config();
        config.provider = "smtp".to_string();
        let sender = EmailSender::new(config);

        let result = sender.send_mail("user@example.com", "Test", "Test").await;
        assert!(matches!(result, Err(MailError::SendFailed(_))));
    }
}
