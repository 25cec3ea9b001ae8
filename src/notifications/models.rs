use serde::{Deserialize, Serialize};

use crate::monitor_modules::config::MonitorConfig;

/// Subject line of every alert email.
pub const ALERT_SUBJECT: &str = "ALERT: Service Monitor";

/// A plain-text alert email. Lives only while it is handed to a sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Builds the alert for `config`'s target with `cause` as the explanation.
    pub fn for_target(config: &MonitorConfig, cause: &str) -> Self {
        Self {
            subject: ALERT_SUBJECT.to_string(),
            body: format!(
                "Connection fail: {cause}\n\nMonitored URL: {url}\nExpected status: {expected}",
                url = config.monitor_url,
                expected = config.expect_code,
            ),
        }
    }
}

/// What the provider handed back for an accepted email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}
