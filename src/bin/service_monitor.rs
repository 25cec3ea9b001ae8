use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use service_monitor::version::VERSION;
use service_monitor::{
    exit_status, load_monitor_config, run_invocation, AlertService, Mode, ReqwestFetcher,
    SesSender,
};

/// Probe one HTTP endpoint and email an alert when it misbehaves.
#[derive(Parser, Debug)]
#[command(name = "service-monitor", version = VERSION)]
struct Cli {
    /// TOML file with the monitor settings. Defaults to the process environment.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit stdout logs as JSON.
    #[arg(long)]
    json_logs: bool,

    /// Also write JSON logs to a daily-rolling file in this directory.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Send one alert email without probing, to verify delivery.
    #[arg(long)]
    test_alert: bool,
}

fn init_logging(json_logs: bool, log_dir: Option<&Path>) {
    let file_layer = log_dir.map(|dir| {
        fmt::layer()
            .with_writer(rolling::daily(dir, "service-monitor.log"))
            .with_ansi(false)
            .json()
    });

    let (json_stdout, plain_stdout) = if json_logs {
        (Some(fmt::layer().with_writer(std::io::stdout).json()), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stdout)))
    };

    // Default to `info` level if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(json_stdout)
        .with(plain_stdout)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    init_logging(cli.json_logs, cli.log_dir.as_deref());
    info!(version = VERSION, "Starting service monitor...");

    let config = match load_monitor_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Critical error loading configuration. Exiting.");
            return ExitCode::from(e.exit_code());
        }
    };

    let mode = if cli.test_alert {
        Mode::TestAlert
    } else {
        Mode::Check
    };
    // SES is only contacted if an alert is actually sent.
    let alerts = AlertService::new(SesSender::from_config(&config));

    let result = run_invocation(&config, &alerts, ReqwestFetcher::new, mode).await;
    match &result {
        Ok(()) => info!(url = %config.monitor_url, "Service monitor finished."),
        Err(e) => error!(url = %config.monitor_url, error = %e, "Service monitor failed."),
    }
    ExitCode::from(exit_status(&result))
}
