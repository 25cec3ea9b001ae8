/// Release version reported by `--version` and the startup log line.
///
/// Release pipelines stamp `APP_VERSION` at build time; local builds report
/// the crate version.
pub const VERSION: &str = match option_env!("APP_VERSION") {
    Some(stamped) => stamped,
    None => env!("CARGO_PKG_VERSION"),
};
