use std::collections::HashMap;

use tracing::warn;

use crate::error::ConfigError;
use crate::types::{ClassificationPolicy, Config, DeploymentMode};

pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;
pub const MIN_INTERVAL_MINUTES: u64 = 1;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config, ConfigError> {
    let webhook_url = env
        .get_var("WEBHOOK_URL")
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingVariable("WEBHOOK_URL"))?;

    let interval_minutes = match env.get_var("INTERVAL_IN_MINUTES") {
        None => DEFAULT_INTERVAL_MINUTES,
        Some(raw) => match raw.parse::<u64>() {
            Ok(minutes) if minutes >= MIN_INTERVAL_MINUTES => minutes,
            Ok(_) => {
                warn!(
                    "INTERVAL_IN_MINUTES must be {} or higher, defaulting to {}",
                    MIN_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES
                );
                MIN_INTERVAL_MINUTES
            }
            Err(_) => {
                warn!(
                    "Invalid INTERVAL_IN_MINUTES value {:?}, defaulting to {}",
                    raw, MIN_INTERVAL_MINUTES
                );
                MIN_INTERVAL_MINUTES
            }
        },
    };

    let deployment_mode = match env.get_var("ENVIRONMENT").as_deref() {
        Some("dev") => DeploymentMode::Dev,
        _ => DeploymentMode::InCluster,
    };

    let policy = match env.get_var("CLASSIFICATION_POLICY").as_deref() {
        None => ClassificationPolicy::default(),
        Some("age-aware") => ClassificationPolicy::AgeAware,
        Some("simple") => ClassificationPolicy::Simple,
        Some(other) => {
            warn!(
                "Unknown CLASSIFICATION_POLICY value {:?}, using age-aware",
                other
            );
            ClassificationPolicy::default()
        }
    };

    Ok(Config {
        webhook_url,
        interval_minutes,
        deployment_mode,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading_with_env() {
        let env = MockEnvironment::new()
            .with_var("WEBHOOK_URL", "https://discord.com/api/webhooks/test")
            .with_var("INTERVAL_IN_MINUTES", "5")
            .with_var("ENVIRONMENT", "dev")
            .with_var("CLASSIFICATION_POLICY", "simple");

        let config = load_config_with_env(&env).unwrap();

        assert_eq!(config.webhook_url, "https://discord.com/api/webhooks/test");
        assert_eq!(config.interval_minutes, 5);
        assert_eq!(config.deployment_mode, DeploymentMode::Dev);
        assert_eq!(config.policy, ClassificationPolicy::Simple);
    }

    #[test]
    fn test_config_loading_defaults() {
        let env = MockEnvironment::new().with_var("WEBHOOK_URL", "https://hooks.test/abc");

        let config = load_config_with_env(&env).unwrap();

        assert_eq!(config.interval_minutes, 10); // default
        assert_eq!(config.deployment_mode, DeploymentMode::InCluster); // default
        assert_eq!(config.policy, ClassificationPolicy::AgeAware); // default
    }

    #[test]
    fn test_config_loading_missing_webhook_url() {
        let env = MockEnvironment::new();

        let result = load_config_with_env(&env);
        assert_eq!(result.unwrap_err(), ConfigError::MissingVariable("WEBHOOK_URL"));

        // An empty value is as fatal as a missing one
        let env = MockEnvironment::new().with_var("WEBHOOK_URL", "");

        let result = load_config_with_env(&env);
        assert_eq!(result.unwrap_err(), ConfigError::MissingVariable("WEBHOOK_URL"));
    }

    #[test]
    fn test_interval_fallback_to_minimum() {
        // Below the minimum
        let env = MockEnvironment::new()
            .with_var("WEBHOOK_URL", "https://hooks.test/abc")
            .with_var("INTERVAL_IN_MINUTES", "0");

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.interval_minutes, 1);

        // Negative values do not parse as unsigned minutes
        let env = MockEnvironment::new()
            .with_var("WEBHOOK_URL", "https://hooks.test/abc")
            .with_var("INTERVAL_IN_MINUTES", "-3");

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.interval_minutes, 1);

        // Not a number at all
        let env = MockEnvironment::new()
            .with_var("WEBHOOK_URL", "https://hooks.test/abc")
            .with_var("INTERVAL_IN_MINUTES", "soon");

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.interval_minutes, 1);

        // The minimum itself is accepted as-is
        let env = MockEnvironment::new()
            .with_var("WEBHOOK_URL", "https://hooks.test/abc")
            .with_var("INTERVAL_IN_MINUTES", "1");

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.interval_minutes, 1);
    }

    #[test]
    fn test_deployment_mode_parsing() {
        for (value, expected) in [
            ("dev", DeploymentMode::Dev),
            ("production", DeploymentMode::InCluster),
            ("DEV", DeploymentMode::InCluster),
            ("", DeploymentMode::InCluster),
        ] {
            let env = MockEnvironment::new()
                .with_var("WEBHOOK_URL", "https://hooks.test/abc")
                .with_var("ENVIRONMENT", value);

            let config = load_config_with_env(&env).unwrap();
            assert_eq!(config.deployment_mode, expected, "Failed for value: {}", value);
        }
    }

    #[test]
    fn test_classification_policy_parsing() {
        for (value, expected) in [
            ("age-aware", ClassificationPolicy::AgeAware),
            ("simple", ClassificationPolicy::Simple),
            ("bogus", ClassificationPolicy::AgeAware),
            ("", ClassificationPolicy::AgeAware),
        ] {
            let env = MockEnvironment::new()
                .with_var("WEBHOOK_URL", "https://hooks.test/abc")
                .with_var("CLASSIFICATION_POLICY", value);

            let config = load_config_with_env(&env).unwrap();
            assert_eq!(config.policy, expected, "Failed for value: {}", value);
        }
    }
}
