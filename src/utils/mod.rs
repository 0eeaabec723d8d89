pub mod build_info;
pub mod persistence;

use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = "bank_analyzer";
const HOME_ENV: &str = "BANK_ANALYZER_HOME";

/// Installs the global tracing subscriber; `RUST_LOG` overrides the default directive.
///
/// Called once from [`crate::init`]. If another subscriber is already installed (an
/// embedding application or a test harness), that one is kept.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bank_analyzer=info"));

    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(error = %err, "keeping the existing tracing subscriber");
    }
}

/// Returns the application data directory, honouring `BANK_ANALYZER_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
