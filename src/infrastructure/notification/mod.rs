//! Notification gateway implementations

mod logging_gateway;
#[cfg(test)]
mod recording;

pub use logging_gateway::LoggingNotificationGateway;
#[cfg(test)]
pub use recording::{RecordingNotificationGateway, SentNotification};
