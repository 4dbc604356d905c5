//! Runtime settings read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present;
//! variables already set in the process environment take precedence.

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Per-file cap for multipart uploads.
    pub max_upload_bytes: usize,
    pub json_limit_bytes: usize,
    /// Directory of a built frontend to serve at `/`.
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Config {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse(var("PORT"), "PORT", "port number")?.unwrap_or(defaults.port),
            max_upload_bytes: parse(var("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES", "byte count")?
                .unwrap_or(defaults.max_upload_bytes),
            json_limit_bytes: parse(var("JSON_LIMIT_BYTES"), "JSON_LIMIT_BYTES", "byte count")?
                .unwrap_or(defaults.json_limit_bytes),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value: v,
            })
        })
        .transpose()
}
