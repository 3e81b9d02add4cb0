//! Runtime configuration read from the environment (`.env` is loaded by `main`)

use std::str::FromStr;

use reqwest::Method;
use thiserror::Error;

/// Errors raised while reading configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings for the emulator client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub endpoint: String,
    pub method: Method,
    /// Log the raw response body at info level
    pub verbose: bool,
}

impl EmulatorConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://funpay.ru/yandex/emulator";

    /// Read `EMULATOR_ENDPOINT`, `EMULATOR_METHOD` and `EMULATOR_VERBOSE`,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("EMULATOR_ENDPOINT") {
            if endpoint.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: "EMULATOR_ENDPOINT",
                    value: endpoint,
                });
            }
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(method) = lookup("EMULATOR_METHOD") {
            config.method = Method::from_str(&method.trim().to_uppercase()).map_err(|_| {
                ConfigError::InvalidValue {
                    name: "EMULATOR_METHOD",
                    value: method.clone(),
                }
            })?;
        }

        if let Some(verbose) = lookup("EMULATOR_VERBOSE") {
            config.verbose = parse_flag(&verbose).ok_or(ConfigError::InvalidValue {
                name: "EMULATOR_VERBOSE",
                value: verbose.clone(),
            })?;
        }

        Ok(config)
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            method: Method::POST,
            verbose: false,
        }
    }
}

/// Transfer the binary sends when run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInput {
    pub receiver: String,
    pub sum: String,
}

impl TransferInput {
    const DEFAULT_RECEIVER: &'static str = "4100175017397";
    const DEFAULT_SUM: &'static str = "555";

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            receiver: lookup("TRANSFER_RECEIVER").unwrap_or_else(|| Self::DEFAULT_RECEIVER.to_string()),
            sum: lookup("TRANSFER_SUM").unwrap_or_else(|| Self::DEFAULT_SUM.to_string()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EmulatorConfig::from_lookup(lookup_from(&[])).expect("Config failed");

        assert_eq!(config, EmulatorConfig::default());
        assert_eq!(config.endpoint, EmulatorConfig::DEFAULT_ENDPOINT);
        assert_eq!(config.method, Method::POST);
        assert!(!config.verbose);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = EmulatorConfig::from_lookup(lookup_from(&[
            ("EMULATOR_ENDPOINT", "http://127.0.0.1:8080/emulator"),
            ("EMULATOR_METHOD", "get"),
            ("EMULATOR_VERBOSE", "yes"),
        ]))
        .expect("Config failed");

        assert_eq!(config.endpoint, "http://127.0.0.1:8080/emulator");
        assert_eq!(config.method, Method::GET);
        assert!(config.verbose);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(EmulatorConfig::from_lookup(lookup_from(&[("EMULATOR_VERBOSE", "maybe")])).is_err());
        assert!(EmulatorConfig::from_lookup(lookup_from(&[("EMULATOR_ENDPOINT", "  ")])).is_err());
        assert!(EmulatorConfig::from_lookup(lookup_from(&[("EMULATOR_METHOD", "PO ST")])).is_err());
    }

    #[test]
    fn test_transfer_input_defaults() {
        let input = TransferInput::from_lookup(lookup_from(&[("TRANSFER_SUM", "10")]));

        assert_eq!(input.receiver, "4100175017397");
        assert_eq!(input.sum, "10");
    }
}
