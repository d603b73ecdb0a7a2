//! Tracing setup. The terminal belongs to the UI, so events go to a log file
//! next to the config.

use crate::config::RosterConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the configured filter; an unparsable filter falls back to `info`.
pub fn env_filter(config: &RosterConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to [`RosterConfig::log_path`].
///
/// Logging is optional: if the file cannot be opened nothing is installed.
/// Only the first call takes effect.
pub fn init_tracing(config: &RosterConfig) {
    let path = RosterConfig::log_path();
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
}
