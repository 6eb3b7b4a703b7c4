//! Logger initialization.
//!
//! The crate logs through the `log` facade: `debug` when GPU objects are
//! created, `trace` once per draw. [`init_logging`] installs an `env_logger`
//! backend for binaries and tests that do not bring their own.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "vertex_stage=trace,wgpu=warn"). `None` falls back to `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

/// Filter used when neither an explicit filter nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "vertex_stage=info,wgpu=warn";

static INIT: Once = Once::new();

/// Picks the filter: explicit, then `RUST_LOG`, then [`DEFAULT_FILTER`].
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. An explicit filter wins over
/// `RUST_LOG`, which wins over [`DEFAULT_FILTER`]. Does nothing if another
/// logger is already installed.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());
        builder.parse_filters(&filter);

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::new().filter("vertex_stage=trace"));
        init_logging(LoggingConfig::default());
        log::trace!("still alive");
    }

    #[test]
    fn filter_builder_sets_filter() {
        let config = LoggingConfig::new().filter("warn");
        assert_eq!(config.env_filter.as_deref(), Some("warn"));
    }

    #[test]
    fn default_filter_targets_this_crate() {
        assert_eq!(resolve_filter(None, None), "vertex_stage=info,wgpu=warn");
    }

    #[test]
    fn explicit_filter_wins_over_env() {
        assert_eq!(
            resolve_filter(Some("vertex_stage=trace".into()), Some("debug".into())),
            "vertex_stage=trace"
        );
        assert_eq!(resolve_filter(None, Some("debug".into())), "debug");
    }
}
