//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{ControllerConfig, FailbackSettings, FailoverSettings};
use crate::config::validation::{validate_config, validate_failover_settings, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Missing(Vec<String>),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Missing(names) => {
                write!(f, "Missing environment variables: {}", names.join(", "))
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate tunables from a TOML file.
pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ControllerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load tunables from `path` if given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ControllerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ControllerConfig::default()),
    }
}

/// Collects required variables, remembering every missing name.
struct EnvReader<F> {
    lookup: F,
    missing: Vec<String>,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self { lookup, missing: Vec::new() }
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&mut self, key: &str) -> String {
        match self.optional(key) {
            Some(value) => value,
            None => {
                self.missing.push(key.to_string());
                String::new()
            }
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(self.missing))
        }
    }
}

impl FailoverSettings {
    /// Read failover settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read failover settings through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(lookup);
        let settings = Self {
            primary_region: env.required("PRIMARY_REGION"),
            primary_endpoint: env.required("PRIMARY_ENDPOINT"),
            dr_endpoint: env.required("DR_ENDPOINT"),
            dr_region: env.optional("DR_REGION"),
            dr_asg_name: env.required("DR_ASG_NAME"),
            hosted_zone_id: env.required("HOSTED_ZONE_ID"),
            domain_name: env.required("DOMAIN_NAME"),
            sns_topic_arn: env.required("SNS_TOPIC_ARN"),
            slack_webhook_url: env.required("SLACK_WEBHOOK_URL"),
            corroboration_endpoint: env.optional("CORROBORATION_ENDPOINT"),
        };
        env.finish()?;

        validate_failover_settings(&settings).map_err(ConfigError::Validation)?;
        Ok(settings)
    }
}

impl FailbackSettings {
    /// Read failback settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read failback settings through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(lookup);
        let settings = Self {
            primary_region: env.required("PRIMARY_AWS_REGION"),
            dr_region: env.required("DR_AWS_REGION"),
            primary_asg_name: env.required("PRIMARY_ASG_NAME"),
            dr_asg_name: env.required("DR_ASG_NAME"),
            domain_name: env.required("DOMAIN_NAME"),
            primary_domain_name: env.required("PRIMARY_DOMAIN_NAME"),
            hosted_zone_id: env.required("HOSTED_ZONE_ID"),
        };
        env.finish()?;
        Ok(settings)
    }
}
