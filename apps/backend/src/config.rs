//! Runtime configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the upstream grading API.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub ai: AiConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - DATABASE_URL: PostgreSQL connection string
    /// - AI_API_KEY: Bearer credential for the grading API
    /// - AI_API_URL: Chat completion endpoint
    ///
    /// Optional: HOST, PORT, AI_MODEL, AI_MAX_TOKENS, AI_TEMPERATURE, AI_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            ai: AiConfig {
                api_key: required("AI_API_KEY")?,
                api_url: required("AI_API_URL")?,
                model: lookup("AI_MODEL").unwrap_or_else(|| "deepseek-chat".to_string()),
                max_tokens: parse_or(&lookup, "AI_MAX_TOKENS", 2000)?,
                temperature: parse_or(&lookup, "AI_TEMPERATURE", 0.7)?,
                timeout: Duration::from_secs(parse_or(&lookup, "AI_TIMEOUT_SECS", 120)?),
            },
        })
    }

    /// Address the server listens on.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
