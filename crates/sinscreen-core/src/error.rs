//! Error types for Sinscreen

/// Result type alias using Sinscreen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sinscreen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexicon loading or lookup errors
    #[error("lexicon error: {0}")]
    Lexicon(String),

    /// Rejected feedback submissions
    #[error("feedback error: {0}")]
    Feedback(String),

    /// Scorer construction or evaluation errors
    #[error("scorer error: {0}")]
    Scorer(String),

    /// Learned-model sidecar errors
    #[error("learned model error: {0}")]
    Learned(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new lexicon error
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Self::Lexicon(msg.into())
    }

    /// Create a new feedback error
    pub fn feedback(msg: impl Into<String>) -> Self {
        Self::Feedback(msg.into())
    }

    /// Create a new scorer error
    pub fn scorer(msg: impl Into<String>) -> Self {
        Self::Scorer(msg.into())
    }

    /// Create a new learned-model error
    pub fn learned(msg: impl Into<String>) -> Self {
        Self::Learned(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
