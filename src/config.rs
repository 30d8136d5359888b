//! Startup configuration
//!
//! Everything is read from the environment once, in `main`. A configuration
//! error is fatal: the server never starts listening.

use crate::llm::LlmConfig;
use thiserror::Error;

/// Port used when `MINDMATE_PORT` is not set
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found. Set GROQ_API_KEY in the environment.")]
    MissingApiKey,
    #[error("Unknown model '{0}'. See GET /api/models for the supported list.")]
    UnknownModel(String),
    #[error("Invalid MINDMATE_PORT value '{0}'")]
    InvalidPort(String),
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_port(std::env::var("MINDMATE_PORT").ok().as_deref())?,
            llm: LlmConfig::from_env(),
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort(value.to_string())),
    }
}
