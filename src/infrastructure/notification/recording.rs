//! Notification gateway that keeps sent messages in memory

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{DomainError, NotificationGateway};

/// A message captured by [`RecordingNotificationGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Test double that records messages and can be told to fail
#[derive(Debug, Default, Clone)]
pub struct RecordingNotificationGateway {
    sent: Arc<RwLock<Vec<SentNotification>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl RecordingNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether sends should fail
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    /// Every message accepted so far, oldest first
    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotificationGateway {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::notification("Recording gateway configured to fail"));
        }

        self.sent.write().await.push(SentNotification {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_messages() {
        let gateway = RecordingNotificationGateway::new();

        gateway.send("ana@x.com", "Welcome!", "Hi").await.unwrap();

        let sent = gateway.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@x.com");
        assert_eq!(sent[0].subject, "Welcome!");
    }

    #[tokio::test]
    async fn test_failing_gateway_records_nothing() {
        let gateway = RecordingNotificationGateway::new();
        gateway.set_should_fail(true).await;

        assert!(gateway.send("ana@x.com", "Welcome!", "Hi").await.is_err());
        assert!(gateway.sent().await.is_empty());
    }
}
