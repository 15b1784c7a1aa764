use anirec_models::ModelError;
use thiserror::Error;

/// Errors from the catalog and scheduler clients
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Schema(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}
