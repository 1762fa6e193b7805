//! Resilience configuration
//!
//! Layered loading: an optional `microlink` config file, overridden by
//! `MICROLINK__`-prefixed environment variables. Fault rules are validated
//! eagerly so a bad percentage fails startup instead of a request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use application::RetryRules;
use domain::FailureKind;

use crate::fault::FaultRule;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A fault rule cannot behave sensibly as configured
    #[error("Invalid fault rule: {0}")]
    InvalidFaultRule(String),

    /// The underlying configuration source failed to load or parse
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Retry section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Master retry switch
    pub enabled: bool,
    /// Extra attempts against the already-chosen instance
    pub max_same_server: u32,
    /// Extra attempts against freshly selected instances
    pub max_next_server: u32,
    /// Failure categories added to the same-server retry set
    pub extra_retry_on_same: Vec<FailureKind>,
    /// Failure categories added to the circuit-tripping set
    pub extra_circuit_tripping: Vec<FailureKind>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_same_server: 0,
            max_next_server: 0,
            extra_retry_on_same: Vec::new(),
            extra_circuit_tripping: Vec::new(),
        }
    }
}

/// Root configuration of the resilience pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Fault rules, evaluated in order
    pub fault: Vec<FaultRule>,
    /// Retry limits and classification tuning
    pub retry: RetryConfig,
}

impl ResilienceConfig {
    /// Load configuration from the `microlink` file plus the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a source fails to parse or a fault rule
    /// is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("microlink").required(false))
            .add_source(config::Environment::with_prefix("MICROLINK").separator("__"))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate every configured fault rule
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidFaultRule` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.fault {
            rule.validate()?;
        }
        Ok(())
    }

    /// Retry rules derived from the retry section
    #[must_use]
    pub fn retry_rules(&self) -> RetryRules {
        let mut rules = RetryRules::new(
            self.retry.enabled,
            self.retry.max_same_server,
            self.retry.max_next_server,
        );
        for kind in &self.retry.extra_retry_on_same {
            rules.allow_retry_on_same(*kind);
        }
        for kind in &self.retry.extra_circuit_tripping {
            rules.allow_circuit_tripping(*kind);
        }
        rules
    }
}
