use std::time::Duration;

use thiserror::Error;

const ENV_TICK_MS: &str = "STOPWATCH_TICK_MS";
const ENV_LOG: &str = "STOPWATCH_LOG";
const ENV_RUST_LOG: &str = "RUST_LOG";

const DEFAULT_TICK_MS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidTickInterval { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Cadence of the tick pump while the stopwatch runs.
    pub tick_interval: Duration,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(ENV_TICK_MS) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTickInterval {
                    var: ENV_TICK_MS,
                    value: raw.clone(),
                })?;
            config.tick_interval = Duration::from_millis(ms);
        }

        // RUST_LOG wins; STOPWATCH_LOG is the app-specific fallback
        if let Some(filter) = lookup(ENV_RUST_LOG).or_else(|| lookup(ENV_LOG)) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval, Duration::from_millis(10));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_tick_override() {
        let config = Config::from_lookup(lookup(&[("STOPWATCH_TICK_MS", " 50 ")])).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_tick() {
        for bad in ["0", "-5", "fast", ""] {
            let err = Config::from_lookup(lookup(&[("STOPWATCH_TICK_MS", bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidTickInterval { var: "STOPWATCH_TICK_MS", value: bad.to_string() }
            );
        }
    }

    #[test]
    fn test_log_filter_precedence() {
        let config = Config::from_lookup(lookup(&[("STOPWATCH_LOG", "debug")])).unwrap();
        assert_eq!(config.log_filter, "debug");

        let config = Config::from_lookup(lookup(&[
            ("STOPWATCH_LOG", "debug"),
            ("RUST_LOG", "stopwatch=trace"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "stopwatch=trace");
    }
}
