//! Tracing setup
//!
//! Build progress itself is written to an [`OutputSink`](crate::sink::OutputSink);
//! tracing carries the diagnostics around it (connection attempts, skipped payloads,
//! unknown phases).

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `EnvFilter` directives for `config`: the base level, then one
/// `imagebuilder::<module>=<level>` entry per component, in module order.
///
/// ```
/// use imagebuilder::config::logging::{LogFormat, LoggingConfig};
/// use imagebuilder::logging::build_filter_directives;
///
/// let mut config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Default::default(),
/// };
/// config.component_levels.insert("build".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "info,imagebuilder::build=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    std::iter::once(config.level.clone())
        .chain(
            config
                .component_levels
                .iter()
                .map(|(module, level)| format!("imagebuilder::{}={}", module, level)),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on configuration
///
/// `RUST_LOG` takes precedence over the configured directives. Output goes to stderr
/// so it never interleaves with build logs written to stdout.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_components_in_module_order() {
        let mut levels = BTreeMap::new();
        levels.insert("sink".to_string(), "trace".to_string());
        levels.insert("build".to_string(), "debug".to_string());
        let config = LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Json,
            component_levels: levels,
        };

        assert_eq!(
            build_filter_directives(&config),
            "info,imagebuilder::build=debug,imagebuilder::sink=trace"
        );
    }
}
