//! Logging setup
//!
//! JSON lines on stderr; stdout carries results only. `RUST_LOG` takes
//! precedence over the configured filter.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging("structval=debug");
        init_logging("structval=warn");
        tracing::debug!("logging initialised");
    }
}
