//! Startup configuration, read once from the environment.

use herald_events::FailurePolicy;
use herald_infra::OutputFormat;
use herald_observability::LogFormat;

pub const OUTPUT_FORMAT_VAR: &str = "HERALD_OUTPUT_FORMAT";
pub const FAILURE_POLICY_VAR: &str = "HERALD_FAILURE_POLICY";
pub const LOG_FORMAT_VAR: &str = "HERALD_LOG_FORMAT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub output_format: OutputFormat,
    pub failure_policy: FailurePolicy,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read every setting from the process environment; unset variables take their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`], with variables resolved by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let output_format = match lookup(OUTPUT_FORMAT_VAR) {
            Some(value) => value.parse::<OutputFormat>().map_err(|e| {
                ConfigError::Invalid {
                    var: OUTPUT_FORMAT_VAR,
                    reason: e.to_string(),
                    value,
                }
            })?,
            None => defaults.output_format,
        };

        let failure_policy = match lookup(FAILURE_POLICY_VAR) {
            Some(value) => parse_policy(&value).ok_or_else(|| ConfigError::Invalid {
                var: FAILURE_POLICY_VAR,
                reason: "expected `fail_fast` or `continue`".to_string(),
                value,
            })?,
            None => defaults.failure_policy,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                var: LOG_FORMAT_VAR,
                value,
                reason,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            output_format,
            failure_policy,
            log_format,
        })
    }
}

fn parse_policy(value: &str) -> Option<FailurePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fail_fast" | "fail-fast" => Some(FailurePolicy::FailFast),
        "continue" | "continue_on_error" => Some(FailurePolicy::ContinueOnError),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn unset_variables_take_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.output_format, OutputFormat::Text);
        assert_eq!(cfg.failure_policy, FailurePolicy::FailFast);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn every_variable_is_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (OUTPUT_FORMAT_VAR, "json"),
            (FAILURE_POLICY_VAR, "continue"),
            (LOG_FORMAT_VAR, "text"),
        ]))
        .unwrap();
        assert_eq!(cfg.output_format, OutputFormat::Json);
        assert_eq!(cfg.failure_policy, FailurePolicy::ContinueOnError);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(FAILURE_POLICY_VAR, "sometimes")])).unwrap_err();
        let ConfigError::Invalid { var, value, .. } = &err;
        assert_eq!(*var, FAILURE_POLICY_VAR);
        assert_eq!(value, "sometimes");
        assert!(err.to_string().contains("HERALD_FAILURE_POLICY"));
    }

    #[test]
    fn invalid_output_format_is_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[(OUTPUT_FORMAT_VAR, "xml")])).is_err());
    }
}
