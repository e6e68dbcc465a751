//! Error definitions for the quickstart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("API key not found: set GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("Auth error: {message}")]
    Auth { message: String },

    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("No model supports generateContent ({listed} models listed)")]
    NoCapableModel { listed: usize },

    #[error("Generation failed: {message}")]
    Generation {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// 凭据缺失或被拒绝。
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::Auth { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
