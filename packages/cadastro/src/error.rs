//! Error types for the address registration flow.

use thiserror::Error;

/// Result type for cadastro operations.
pub type Result<T> = std::result::Result<T, CadastroError>;

#[derive(Debug, Error)]
pub enum CadastroError {
    /// Configuration error (unparseable env value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout, bad body)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from a backend
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Identity backend does not know this CPF / matrícula
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("No CPF or matrícula entered")]
    EmptyIdentity,

    /// Submit called before a member was verified
    #[error("No verified member")]
    NotAuthenticated,

    #[error("Postal lookup failed: {0}")]
    Lookup(#[from] viacep_client::ViaCepError),

    /// Durable marker storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for CadastroError {
    fn from(err: std::io::Error) -> Self {
        CadastroError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CadastroError {
    fn from(err: serde_json::Error) -> Self {
        CadastroError::Storage(err.to_string())
    }
}
