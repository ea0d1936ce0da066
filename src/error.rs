use thiserror::Error;

/// Failures surfaced to the user. None of them end the session; each one is
/// scoped to the operation that raised it.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// Raised before any network call is made.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("news lookup failed: {0}")]
    NewsLookupFailed(String),
}

pub type Result<T> = std::result::Result<T, NewsletterError>;
