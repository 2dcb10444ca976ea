//! Logging setup for the command-line front end.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. Logs go to stderr so stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for a `-v` count: warn, then debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise the verbosity level.
pub fn build_filter(verbosity: u8) -> EnvFilter {
    let default_level = level_for_verbosity(verbosity);
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!(
            "nodeconf={},warn",
            default_level.to_string().to_lowercase()
        )))
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing
/// one is kept.
pub fn init_logging(verbosity: u8) -> bool {
    match tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "keeping existing tracing subscriber");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::DEBUG);
        assert_eq!(level_for_verbosity(5), Level::TRACE);
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        init_logging(0);
        assert!(!init_logging(2));
    }
}
