use async_trait::async_trait;
use thiserror::Error;

use super::models::{AlertMessage, SendReceipt};

pub mod ses;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
    #[error("Invalid configuration for sender: {0}")]
    InvalidConfiguration(String),
}

/// A transactional email provider.
/// Implementations deliver exactly one attempt per call and never retry.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends `message` from `from` to the single recipient `to`.
    async fn send(
        &self,
        from: &str,
        to: &str,
        message: &AlertMessage,
    ) -> Result<SendReceipt, SenderError>;
}
