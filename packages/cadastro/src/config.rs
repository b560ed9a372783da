use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CadastroError, Result};

pub const DEFAULT_CENSO_API: &str = "https://backend-censo-p8hr.onrender.com";
pub const DEFAULT_ENDERECO_API: &str = "https://backend-endereco.onrender.com";
pub const DEFAULT_STORE_PATH: &str = ".cadastro/markers.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Form configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the census (identity) backend
    pub censo_api_url: String,
    /// Base URL of the address backend
    pub endereco_api_url: String,
    /// File holding saved-address markers
    pub store_path: PathBuf,
    /// Block a second save for a member who already saved
    pub save_guard: bool,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            censo_api_url: DEFAULT_CENSO_API.to_string(),
            endereco_api_url: DEFAULT_ENDERECO_API.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            save_guard: true,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source. Unset or blank values fall back to defaults.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            censo_api_url: var("CENSO_API")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.censo_api_url),
            endereco_api_url: var("ENDERECO_API")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endereco_api_url),
            store_path: var("CADASTRO_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            save_guard: match var("CADASTRO_SAVE_GUARD") {
                Some(v) => parse_bool("CADASTRO_SAVE_GUARD", &v)?,
                None => defaults.save_guard,
            },
            http_timeout: match var("HTTP_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                    CadastroError::Config(format!(
                        "HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        v
                    ))
                })?),
                None => defaults.http_timeout,
            },
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CadastroError::Config(format!(
            "{} must be true or false, got {:?}",
            key, other
        ))),
    }
}
