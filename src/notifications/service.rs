use tracing::{error, info};

use super::models::{AlertMessage, SendReceipt};
use super::senders::{EmailSender, SenderError};
use crate::monitor_modules::config::MonitorConfig;

/// Formats alerts for a monitor and hands them to an [`EmailSender`].
pub struct AlertService<S> {
    sender: S,
}

impl<S: EmailSender> AlertService<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Sends one alert describing `cause` to the configured recipient.
    pub async fn send_alert(
        &self,
        config: &MonitorConfig,
        cause: &str,
    ) -> Result<SendReceipt, SenderError> {
        let message = AlertMessage::for_target(config, cause);
        info!(
            from = %config.email_from,
            to = %config.email_to,
            subject = %message.subject,
            "Sending alert email."
        );

        self.sender
            .send(&config.email_from, &config.email_to, &message)
            .await
            .inspect(|receipt| info!(message_id = ?receipt.message_id, "Alert response received."))
            .inspect_err(|e| error!(error = %e, "Alert email was not delivered."))
    }
}
