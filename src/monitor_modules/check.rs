//! Probe-then-alert orchestration for one monitor invocation.
//!
//! Healthy outcomes return `Ok` without touching the email provider. Every
//! other outcome sends exactly one alert and then returns the probe failure
//! itself, whether or not the alert was delivered.
use tracing::{error, info, warn};

use super::config::MonitorConfig;
use super::prober::{probe, HttpFetcher, ProbeOutcome};
use crate::error::MonitorError;
use crate::notifications::senders::EmailSender;
use crate::notifications::service::AlertService;

/// Runs one check against `config.monitor_url`.
pub async fn run_check<F, S>(
    config: &MonitorConfig,
    fetcher: &F,
    alerts: &AlertService<S>,
) -> Result<ProbeOutcome, MonitorError>
where
    F: HttpFetcher + ?Sized,
    S: EmailSender,
{
    info!(url = %config.monitor_url, expected = config.expect_code, "Probing service.");

    match probe(config, fetcher).await.into_result() {
        Ok(outcome) => {
            info!(url = %config.monitor_url, outcome = ?outcome, "Service check passed.");
            Ok(outcome)
        }
        Err(failure) => Err(alert_and_propagate(config, alerts, failure).await),
    }
}

/// Alerts on `failure` and hands it back unchanged.
///
/// A delivery error is only logged; the caller always sees `failure`.
pub async fn alert_and_propagate<S: EmailSender>(
    config: &MonitorConfig,
    alerts: &AlertService<S>,
    failure: MonitorError,
) -> MonitorError {
    warn!(
        url = %config.monitor_url,
        status = ?failure.status(),
        error = %failure,
        "Service check failed. Sending alert."
    );

    if let Err(e) = alerts.send_alert(config, &failure.to_string()).await {
        error!(
            url = %config.monitor_url,
            error = %e,
            original_error = %failure,
            "Alert delivery failed; reporting the original failure."
        );
    }
    failure
}
