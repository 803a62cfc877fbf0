use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Statement builder configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Synthetic identifier column emitted in every SELECT list
    #[validate(
        length(min = 1, message = "Identifier column cannot be empty"),
        custom(function = "validate_column_name")
    )]
    pub identifier_column: String,

    /// Prefix of the synthetic foreign-key column, followed by the referenced entity name
    #[validate(
        length(min = 1, message = "Reference column prefix cannot be empty"),
        custom(function = "validate_column_name")
    )]
    pub reference_column_prefix: String,

    /// Whether filter compilation goes through the single-slot cache
    pub cache_enabled: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            identifier_column: "__ID__".to_string(),
            reference_column_prefix: "__REF__".to_string(),
            cache_enabled: true,
        }
    }
}

impl BuilderConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            identifier_column: env_var_or("SQLTREE_IDENTIFIER_COLUMN", "__ID__")?,
            reference_column_prefix: env_var_or("SQLTREE_REFERENCE_COLUMN_PREFIX", "__REF__")?,
            cache_enabled: parse_env_var("SQLTREE_CACHE_ENABLED", "true")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Synthetic foreign-key column name for a reference to `entity`
    pub fn reference_column(&self, entity: &str) -> String {
        format!("{}{}", self.reference_column_prefix, entity)
    }
}

fn validate_column_name(name: &str) -> Result<(), ValidationError> {
    if name.contains('"') {
        let mut err = ValidationError::new("quote_in_column_name");
        err.message = Some("Column names cannot contain double quotes".into());
        return Err(err);
    }
    Ok(())
}

/// Read an environment variable, falling back to `default` only when it is unset
fn env_var_or(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env_var_or(key, default)?;
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
