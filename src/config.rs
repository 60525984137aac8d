use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const EXPORT_DIR_ENV: &str = "JOTBOARD_EXPORT_DIR";
pub const LOG_ENV: &str = "JOTBOARD_LOG";

/// Process settings read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub export_dir: PathBuf,
    pub use_color: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let export_dir = std::env::var(EXPORT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let use_color = std::env::var("NO_COLOR").is_err();
        Self { export_dir, use_color }
    }
}

/// Send tracing output to stderr, filtered by `JOTBOARD_LOG` (default
/// `warn`). Only binaries call this; a second call is ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
