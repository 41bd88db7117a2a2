//! Application configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//! The event source is kept as a plain identifier here and validated when the
//! [`App`](crate::app::App) is built, so an unknown source surfaces as an
//! adapter configuration error.

use crate::errors::{codes, RouterError};
use crate::event::EventSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// `function_url` or `api_gateway_proxy`.
    pub source: String,
    pub enable_request_logging: bool,
    pub enable_response_logging: bool,
    pub swagger: SwaggerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: EventSource::FunctionUrl.identifier().to_string(),
            enable_request_logging: true,
            enable_response_logging: true,
            swagger: SwaggerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            title: "lambdapi".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: String::new(),
        }
    }
}

impl AppConfig {
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RouterError> {
        toml::from_str(content).map_err(|e| RouterError::Config {
            code: codes::CONFIG_PARSE.to_string(),
            message: format!("Parse error: {}", e),
        })
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, RouterError> {
        let content = fs::read_to_string(path).map_err(|e| RouterError::Config {
            code: codes::CONFIG_IO.to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn event_source(&self) -> Result<EventSource, RouterError> {
        self.source.parse()
    }
}
