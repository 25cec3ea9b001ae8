//! One scheduled invocation: settings, check or test alert, exit status.
use std::path::Path;
use tracing::info;

use super::check::{alert_and_propagate, run_check};
use super::config::{load_config_file, MonitorConfig};
use super::prober::{HttpFetcher, TransportError};
use crate::error::MonitorError;
use crate::notifications::senders::EmailSender;
use crate::notifications::service::AlertService;

pub const TEST_ALERT_MESSAGE: &str = "Test alert requested from the command line";

/// What the invocation should do once the settings are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Check,
    /// Send one alert without probing, to verify delivery.
    TestAlert,
}

/// Reads the settings from `path` if given, otherwise from the environment.
pub fn load_monitor_config(path: Option<&Path>) -> Result<MonitorConfig, MonitorError> {
    let config = match path {
        Some(path) => load_config_file(path)?,
        None => MonitorConfig::from_env()?,
    };
    Ok(config)
}

/// Runs the invocation. `make_fetcher` is only called in [`Mode::Check`]; if it
/// fails, that failure is alerted like any other transport error.
pub async fn run_invocation<F, S, M>(
    config: &MonitorConfig,
    alerts: &AlertService<S>,
    make_fetcher: M,
    mode: Mode,
) -> Result<(), MonitorError>
where
    F: HttpFetcher,
    S: EmailSender,
    M: FnOnce() -> Result<F, TransportError>,
{
    match mode {
        Mode::TestAlert => {
            let receipt = alerts.send_alert(config, TEST_ALERT_MESSAGE).await?;
            info!(message_id = ?receipt.message_id, "Test alert delivered.");
            Ok(())
        }
        Mode::Check => {
            let fetcher = match make_fetcher() {
                Ok(fetcher) => fetcher,
                Err(e) => return Err(alert_and_propagate(config, alerts, e.into()).await),
            };
            run_check(config, &fetcher, alerts).await.map(|_| ())
        }
    }
}

/// 0 on success, otherwise [`MonitorError::exit_code`].
pub fn exit_status(result: &Result<(), MonitorError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    }
}
