//! Log subscriber setup for `bnav`.
//!
//! Lines go to stderr so `--json` output on stdout stays parseable. The
//! filter is built from birdnav's own targets; HTTP and runtime crates stay
//! at `warn` unless `RUST_LOG` says otherwise.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Targets that carry birdnav's own events: the library and the binary
const OWN_TARGETS: [&str; 2] = ["birdnav", "bnav"];

/// How `bnav` logs.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level for birdnav's own targets
    pub default_level: Level,
    /// Level for everything else (reqwest, hyper, tokio)
    pub dependency_level: Level,
    /// Source file and line on each event
    pub include_file_line: bool,
    /// Module path on each event
    pub include_target: bool,
    pub ansi_colors: bool,
    pub compact: bool,
    /// Raw `EnvFilter` directive, replacing the levels above
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            dependency_level: Level::WARN,
            include_file_line: false,
            include_target: true,
            ansi_colors: true,
            compact: true,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Storage requests, pushes and fallbacks at debug level, with locations.
    pub fn development() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_file_line: true,
            compact: false,
            ..Self::default()
        }
    }

    /// Only failed pushes, fallbacks to the backup and other warnings.
    pub fn production() -> Self {
        Self {
            default_level: Level::WARN,
            include_target: false,
            ansi_colors: false,
            ..Self::default()
        }
    }

    /// Preset for the binary: `--verbose` selects development output.
    /// A non-empty `RUST_LOG` replaces the levels.
    pub fn cli(verbose: bool) -> Self {
        let base = if verbose {
            Self::development()
        } else {
            Self::production()
        };
        Self {
            filter_directive: std::env::var("RUST_LOG").ok().filter(|v| !v.is_empty()),
            ..base
        }
    }

    /// The `EnvFilter` directive this config installs
    pub fn directives(&self) -> String {
        if let Some(ref directive) = self.filter_directive {
            return directive.clone();
        }
        let own_level = self.default_level.as_str().to_lowercase();
        let own = OWN_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, own_level));
        std::iter::once(self.dependency_level.as_str().to_lowercase())
            .chain(own)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Returned by [`init_telemetry`]; hold it for the life of the process.
pub struct TelemetryGuard {
    _private: (),
}

/// Install the global subscriber. Fails if one is already installed or the
/// directive does not parse.
///
/// ```rust,ignore
/// let _guard = birdnav::telemetry::init_telemetry(&TelemetryConfig::cli(false))?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(config.directives())?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line);

    let fmt_layer = if config.compact {
        fmt_layer.compact().boxed()
    } else {
        fmt_layer.boxed()
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(TelemetryGuard { _private: () })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let config = TelemetryConfig::default();
        assert_eq!(config.directives(), "warn,birdnav=info,bnav=info");
    }

    #[test]
    fn test_development_is_verbose_for_own_targets_only() {
        let config = TelemetryConfig::development();
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.dependency_level, Level::WARN);
        assert!(config.include_file_line);
        assert!(config.directives().starts_with("warn,"));
    }

    #[test]
    fn test_production_is_quiet() {
        let config = TelemetryConfig::production();
        assert_eq!(config.default_level, Level::WARN);
        assert!(!config.include_target);
        assert!(!config.ansi_colors);
    }

    #[test]
    fn test_explicit_directive_replaces_levels() {
        let config = TelemetryConfig {
            filter_directive: Some("birdnav::storage=trace".to_string()),
            ..TelemetryConfig::default()
        };
        assert_eq!(config.directives(), "birdnav::storage=trace");
    }

    #[test]
    fn test_directives_parse() {
        for config in [
            TelemetryConfig::default(),
            TelemetryConfig::development(),
            TelemetryConfig::production(),
        ] {
            assert!(EnvFilter::try_new(config.directives()).is_ok());
        }
    }

    #[test]
    fn test_cli_levels() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(TelemetryConfig::cli(true).default_level, Level::DEBUG);
        assert_eq!(TelemetryConfig::cli(false).default_level, Level::WARN);
        assert!(TelemetryConfig::cli(false).filter_directive.is_none());
    }
}
