//! Runtime configuration from environment variables.
//!
//! - `SEVER_STRATEGY`: `weighted` (default) or `nearest`
//! - `LOG_FORMAT`: `pretty` (default) or `json`
//! - `RUST_LOG`: log filter, read directly by the subscriber

use tracing::warn;

use crate::policy::Strategy;

/// Environment variable selecting the ranking strategy.
pub const STRATEGY_VAR: &str = "SEVER_STRATEGY";
/// Environment variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Log output format. Logs always go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse log format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// An environment value that was not understood and fell back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Variable name.
    pub var: &'static str,
    /// Rejected raw value.
    pub value: String,
}

impl ConfigWarning {
    /// Emit this warning through `tracing`.
    ///
    /// Call after the subscriber is installed, or the event is dropped.
    pub fn log(&self) {
        warn!(var = self.var, value = %self.value, "unknown value, using default");
    }
}

/// Settings for one run of the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Ranking strategy.
    pub strategy: Strategy,
    /// Log format.
    pub log_format: LogFormat,
}

impl RunConfig {
    /// Read from the process environment.
    pub fn from_env() -> (Self, Vec<ConfigWarning>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from any key lookup.
    ///
    /// Unknown values fall back to defaults and are returned as warnings
    /// for the caller to log once logging is up.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigWarning>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let strategy =
            parse_or_default(&lookup, STRATEGY_VAR, Strategy::from_str, &mut warnings);
        let log_format =
            parse_or_default(&lookup, LOG_FORMAT_VAR, LogFormat::from_str, &mut warnings);
        (
            Self {
                strategy,
                log_format,
            },
            warnings,
        )
    }
}

fn parse_or_default<F, T>(
    lookup: &F,
    var: &'static str,
    parse: fn(&str) -> Option<T>,
    warnings: &mut Vec<ConfigWarning>,
) -> T
where
    F: Fn(&str) -> Option<String>,
    T: Default,
{
    match lookup(var) {
        None => T::default(),
        Some(value) => parse(&value).unwrap_or_else(|| {
            warnings.push(ConfigWarning { var, value });
            T::default()
        }),
    }
}
