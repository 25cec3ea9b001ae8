//! Fakes for the HTTP and email capabilities.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::sync::Mutex;
use std::time::Duration;

use crate::monitor_modules::config::MonitorConfig;
use crate::monitor_modules::prober::{HttpFetcher, HttpResponse, TransportError};
use crate::notifications::models::{AlertMessage, SendReceipt};
use crate::notifications::senders::{EmailSender, SenderError};

pub fn sample_config(url: &str, expect_code: u16) -> MonitorConfig {
    MonitorConfig {
        monitor_url: url.to_string(),
        expect_code,
        email_from: "monitor@example.com".to_string(),
        email_to: "oncall@example.com".to_string(),
        region: None,
        profile: None,
    }
}

/// Returns the same canned result for every request and records what was asked.
pub struct StaticFetcher {
    result: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<(String, Duration)>>,
}

impl StaticFetcher {
    pub fn status(status: u16, body: &'static str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        Self {
            result: Ok(HttpResponse {
                status,
                body: Bytes::from_static(body.as_bytes()),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for StaticFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push((url.to_string(), timeout));
        self.result.clone()
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub message: AlertMessage,
}

/// Accepts every email and keeps a copy.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingSender {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(
        &self,
        from: &str,
        to: &str,
        message: &AlertMessage,
    ) -> Result<SendReceipt, SenderError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            message: message.clone(),
        });
        Ok(SendReceipt {
            message_id: Some(format!("fake-{}", sent.len())),
        })
    }
}

/// Rejects every email.
pub struct FailingSender;

#[async_trait]
impl EmailSender for FailingSender {
    async fn send(
        &self,
        _from: &str,
        _to: &str,
        _message: &AlertMessage,
    ) -> Result<SendReceipt, SenderError> {
        Err(SenderError::Rejected(
            "MessageRejected: Email address is not verified.".to_string(),
        ))
    }
}
