//! Pure ViaCEP REST API client.
//!
//! A minimal client for the public ViaCEP service, which resolves a Brazilian
//! postal code (CEP) into street, neighborhood, city and state.
//!
//! # Example
//!
//! ```rust,ignore
//! use viacep_client::ViaCepClient;
//!
//! let client = ViaCepClient::new();
//! let found = client.lookup("01001000").await?;
//! println!("{} - {}/{}", found.logradouro, found.localidade, found.uf);
//! ```

pub mod error;
pub mod types;

pub use error::{Result, ViaCepError};
pub use types::CepResponse;

use std::time::Duration;

const BASE_URL: &str = "https://viacep.com.br";

/// Number of digits in a complete CEP.
pub const CEP_LEN: usize = 8;

/// Returns true when `cep` is exactly 8 ASCII digits.
pub fn is_valid_cep(cep: &str) -> bool {
    cep.len() == CEP_LEN && cep.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for ViaCepClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ViaCepClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for proxies or local stubs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuse an existing HTTP client (shared connection pool).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Apply a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL queried for `cep`.
    pub fn lookup_url(&self, cep: &str) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep)
    }

    /// Resolve a CEP. The code must already be normalized to 8 digits.
    pub async fn lookup(&self, cep: &str) -> Result<CepResponse> {
        if !is_valid_cep(cep) {
            return Err(ViaCepError::InvalidCep(cep.to_string()));
        }

        let url = self.lookup_url(cep);
        tracing::debug!(cep, url = %url, "Querying ViaCEP");

        let mut req = self.client.get(&url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ViaCepError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let found: CepResponse = resp.json().await?;
        if found.is_error() {
            tracing::debug!(cep, "ViaCEP flagged code as unknown");
            return Err(ViaCepError::NotFound(cep.to_string()));
        }

        Ok(found)
    }
}
