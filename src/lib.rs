//! One-shot HTTP service monitor with email alerting.
//!
//! A scheduled job builds a [`MonitorConfig`], calls [`run_check`] once and
//! maps the result to its exit status. Failures are alerted by email and then
//! handed back to the caller unchanged.

pub mod error;
pub mod monitor_modules;
pub mod notifications;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::MonitorError;
pub use monitor_modules::check::{alert_and_propagate, run_check};
pub use monitor_modules::config::{load_config_file, ConfigError, MonitorConfig};
pub use monitor_modules::invocation::{
    exit_status, load_monitor_config, run_invocation, Mode, TEST_ALERT_MESSAGE,
};
pub use monitor_modules::prober::{
    probe, HttpFetcher, HttpResponse, ProbeOutcome, ReqwestFetcher, TransportError, PROBE_TIMEOUT,
};
pub use notifications::models::{AlertMessage, SendReceipt, ALERT_SUBJECT};
pub use notifications::senders::{ses::SesSender, EmailSender, SenderError};
pub use notifications::service::AlertService;
