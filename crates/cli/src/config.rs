//! Runtime configuration resolved from flags and the environment.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Environment variable naming the data directory when `--data-dir` is absent.
pub(crate) const DATA_DIR_ENV: &str = "CONTRACTOR_DATA_DIR";
/// Environment variable holding a tracing filter directive (e.g. `debug`).
pub(crate) const LOG_ENV: &str = "CONTRACTOR_LOG";

const DEFAULT_DATA_DIR: &str = ".contractor";
const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// `--data-dir`, then `$CONTRACTOR_DATA_DIR`, then `./.contractor`.
    pub(crate) fn resolve(data_dir_flag: Option<PathBuf>) -> Self {
        let data_dir = data_dir_flag
            .or_else(|| {
                std::env::var(DATA_DIR_ENV)
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self { data_dir }
    }
}

/// Install the stderr log subscriber. stdout is reserved for command output.
pub(crate) fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
