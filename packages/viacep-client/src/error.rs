//! Error types for the ViaCEP client.

use thiserror::Error;

/// Result type for ViaCEP client operations.
pub type Result<T> = std::result::Result<T, ViaCepError>;

/// ViaCEP client errors.
#[derive(Debug, Error)]
pub enum ViaCepError {
    /// The code is not 8 digits, so no request was sent
    #[error("Invalid CEP format: {0:?}")]
    InvalidCep(String),

    /// ViaCEP answered but flagged the code with `erro`
    #[error("CEP not found: {0}")]
    NotFound(String),

    /// Network error (connection failed, timeout, bad body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}
