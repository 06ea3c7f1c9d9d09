//! Tracing subscriber setup. Everything goes to stderr: stdout carries results.

use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

pub fn init(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_ok() {
        tracing::debug!("logger initialized");
    }
}
