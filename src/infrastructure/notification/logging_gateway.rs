//! Notification gateway that writes messages to the log instead of a mail server

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{DomainError, NotificationGateway};

/// Logs every outgoing message as a structured `info` event
#[derive(Debug, Clone)]
pub struct LoggingNotificationGateway {
    sender: String,
    enabled: bool,
}

impl LoggingNotificationGateway {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            enabled: true,
        }
    }

    /// Disabled gateways accept every message and drop it
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl NotificationGateway for LoggingNotificationGateway {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        if !self.enabled {
            debug!(to = %to, subject = %subject, "Notifications disabled, message dropped");
            return Ok(());
        }

        if to.trim().is_empty() {
            return Err(DomainError::notification(format!(
                "Cannot send '{}' without a recipient",
                subject
            )));
        }

        info!(
            from = %self.sender,
            to = %to,
            subject = %subject,
            body = %body,
            "Sending email"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_succeeds() {
        let gateway = LoggingNotificationGateway::new("no-reply@example.com");

        let result = gateway.send("ana@x.com", "Welcome!", "Hello").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_recipient_fails() {
        let gateway = LoggingNotificationGateway::new("no-reply@example.com");

        let result = gateway.send("  ", "Welcome!", "Hello").await;
        assert!(matches!(result, Err(DomainError::Notification { .. })));
    }

    #[tokio::test]
    async fn test_disabled_gateway_drops_messages() {
        let gateway = LoggingNotificationGateway::new("no-reply@example.com").with_enabled(false);

        assert!(gateway.send("", "Welcome!", "Hello").await.is_ok());
    }
}
