use thiserror::Error;

use crate::monitor_modules::config::ConfigError;
use crate::monitor_modules::prober::TransportError;
use crate::notifications::senders::SenderError;

/// Every way a monitor invocation can fail.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("HTTP Error {status}: expected status {expected}")]
    UnexpectedStatus { status: u16, expected: u16 },
    #[error("Unexpected success: received status {status} but expected status {expected}")]
    UnexpectedSuccess { status: u16, expected: u16 },
    #[error("Alert delivery failed: {0}")]
    AlertDelivery(#[from] SenderError),
}

impl MonitorError {
    /// The HTTP status observed by the probe, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            MonitorError::UnexpectedStatus { status, .. }
            | MonitorError::UnexpectedSuccess { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Process exit code for the scheduler.
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::Config(_) => 2,
            MonitorError::AlertDelivery(_) => 3,
            _ => 1,
        }
    }
}
