//! Single-shot HTTP probe and the rules that classify its outcome.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::config::MonitorConfig;
use crate::error::MonitorError;

/// Fixed budget for the whole GET, including reading the body.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// The exchange never produced an HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Redirect not followed: {0}")]
    Redirect(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

impl TransportError {
    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect(error_chain(&err))
        } else if err.is_redirect() {
            TransportError::Redirect(error_chain(&err))
        } else {
            TransportError::Request(error_chain(&err))
        }
    }
}

/// Joins an error with all of its sources, e.g.
/// `error sending request: client error (Connect): Connection refused (os error 111)`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.ends_with(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

/// What came back from the target. `body` is only read for success statuses.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Performs a GET with a timeout.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .bytes()
                .await
                .map_err(|e| TransportError::from_reqwest(e, timeout))?
        } else {
            Bytes::new()
        };

        Ok(HttpResponse { status, body })
    }
}

/// Classified result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Success status while 200 was expected.
    Success { body_len: usize },
    /// Error status equal to the expected one. Healthy for this monitor.
    ExpectedFailure { status: u16 },
    UnexpectedStatus { status: u16, expected: u16 },
    /// Success status while a non-200 code was expected.
    UnexpectedSuccess { status: u16, expected: u16 },
    TransportError(TransportError),
}

impl ProbeOutcome {
    /// Applies the monitor's equality rule to a completed exchange.
    pub fn classify(expected: u16, response: &HttpResponse) -> Self {
        let status = response.status.as_u16();
        if response.status.is_success() {
            if expected == StatusCode::OK.as_u16() {
                ProbeOutcome::Success {
                    body_len: response.body.len(),
                }
            } else {
                ProbeOutcome::UnexpectedSuccess { status, expected }
            }
        } else if status == expected {
            ProbeOutcome::ExpectedFailure { status }
        } else {
            ProbeOutcome::UnexpectedStatus { status, expected }
        }
    }

    /// Healthy outcomes pass through; everything else becomes the failure to alert on.
    pub fn into_result(self) -> Result<ProbeOutcome, MonitorError> {
        match self {
            ProbeOutcome::UnexpectedStatus { status, expected } => {
                Err(MonitorError::UnexpectedStatus { status, expected })
            }
            ProbeOutcome::UnexpectedSuccess { status, expected } => {
                Err(MonitorError::UnexpectedSuccess { status, expected })
            }
            ProbeOutcome::TransportError(e) => Err(MonitorError::Transport(e)),
            healthy => Ok(healthy),
        }
    }
}

/// Issues one GET against the configured URL and classifies the result.
pub async fn probe<F>(config: &MonitorConfig, fetcher: &F) -> ProbeOutcome
where
    F: HttpFetcher + ?Sized,
{
    let outcome = match fetcher.get(&config.monitor_url, PROBE_TIMEOUT).await {
        Ok(response) => ProbeOutcome::classify(config.expect_code, &response),
        Err(e) => ProbeOutcome::TransportError(e),
    };

    match &outcome {
        ProbeOutcome::Success { body_len } => {
            info!(url = %config.monitor_url, body_len = body_len, "Data received.");
        }
        ProbeOutcome::ExpectedFailure { status } => {
            info!(url = %config.monitor_url, status = status, "Success - status as expected.");
        }
        ProbeOutcome::UnexpectedStatus { status, expected } => {
            warn!(url = %config.monitor_url, status = status, expected = expected, "Unexpected HTTP error status.");
        }
        ProbeOutcome::UnexpectedSuccess { status, expected } => {
            warn!(url = %config.monitor_url, status = status, expected = expected, "Target succeeded but a failure status was expected.");
        }
        ProbeOutcome::TransportError(e) => {
            warn!(url = %config.monitor_url, error = %e, "Probe did not complete.");
        }
    }
    outcome
}
