use thiserror::Error;

/// Failure talking to the metadata provider.
///
/// The three failure classes (no response, provider-reported failure, unusable
/// body) stay distinguishable here even though the content pipeline degrades
/// all of them the same way.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl SourceError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Network(_))
    }
}
