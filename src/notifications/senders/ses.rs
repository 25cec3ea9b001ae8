//! Amazon SES delivery through the v2 `SendEmail` API.
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::{config::Region, Client};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{EmailSender, SenderError};
use crate::monitor_modules::config::MonitorConfig;
use crate::notifications::models::{AlertMessage, SendReceipt};

/// A sender for alert emails through Amazon SES.
///
/// The SDK configuration is resolved on the first send, so healthy runs never
/// touch the AWS credential chain.
pub struct SesSender {
    region: Option<String>,
    profile: Option<String>,
    client: OnceCell<Client>,
}

impl SesSender {
    /// Uses an already configured client.
    pub fn new(client: Client) -> Self {
        Self {
            region: None,
            profile: None,
            client: OnceCell::new_with(Some(client)),
        }
    }

    /// Defers to the SDK default chain, narrowed by the optional region and
    /// profile from the monitor settings.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            region: config.region.clone(),
            profile: config.profile.clone(),
            client: OnceCell::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(region) = &self.region {
                    loader = loader.region(Region::new(region.clone()));
                }
                if let Some(profile) = &self.profile {
                    loader = loader.profile_name(profile);
                }
                debug!(region = ?self.region, profile = ?self.profile, "Loading AWS configuration for SES.");

                let sdk_config = loader.load().await;
                Client::new(&sdk_config)
            })
            .await
    }
}

fn text_content(data: &str) -> Result<Content, SenderError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| SenderError::InvalidConfiguration(e.to_string()))
}

/// Text-only simple message: no HTML part, no attachments.
pub(crate) fn email_content(message: &AlertMessage) -> Result<EmailContent, SenderError> {
    let simple = Message::builder()
        .subject(text_content(&message.subject)?)
        .body(Body::builder().text(text_content(&message.body)?).build())
        .build();
    Ok(EmailContent::builder().simple(simple).build())
}

#[async_trait]
impl EmailSender for SesSender {
    async fn send(
        &self,
        from: &str,
        to: &str,
        message: &AlertMessage,
    ) -> Result<SendReceipt, SenderError> {
        let destination = Destination::builder().to_addresses(to).build();
        let content = email_content(message)?;

        let output = self
            .client()
            .await
            .send_email()
            .from_email_address(from)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                if e.as_service_error().is_some() {
                    SenderError::Rejected(detail)
                } else {
                    SenderError::SendFailed(detail)
                }
            })?;

        let receipt = SendReceipt {
            message_id: output.message_id().map(str::to_string),
        };
        info!(message_id = ?receipt.message_id, "SES accepted alert email.");
        Ok(receipt)
    }
}
