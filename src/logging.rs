//! Logger setup for hosts and demos.
//!
//! The library itself only emits through the `log` facade; installing a
//! backend is left to the binary. [`init_logging`] is a convenience that
//! installs `env_logger`.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g. `"scenegrab=debug"`.
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
    /// Builder pattern: Set an explicit filter, overriding `RUST_LOG`
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.env_filter = Some(filter.to_string());
        self
    }

    /// Builder pattern: Disable ANSI colors
    pub fn without_color(mut self) -> Self {
        self.write_style = env_logger::WriteStyle::Never;
        self
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` is read as usual, with `info` when it is unset. An explicit
/// filter in the config is applied on top and wins for the targets it names.
/// Only the first call has an effect. If the host already installed a
/// different logger this leaves it in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
