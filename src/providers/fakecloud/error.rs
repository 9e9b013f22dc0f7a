use thiserror::Error;

/// Errors returned by the fakecloud API client.
///
/// SECURITY: Error messages must NEVER contain the configured password.
#[derive(Debug, Error)]
pub enum FakecloudError {
    /// The configured host is empty or not a valid URL
    #[error("invalid host '{host}': {message}")]
    InvalidHost { host: String, message: String },

    /// No virtual machine with the given ID exists
    #[error("virtual machine {id} not found")]
    NotFound { id: i64 },

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}
