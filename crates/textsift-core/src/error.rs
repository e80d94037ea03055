//! Error types for textsift

/// Result type alias using textsift's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for textsift operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid pattern set: not a string or non-empty list of strings,
    /// or a pattern that fails to compile
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Batch inputs were neither a mapping nor a sequence
    #[error("invalid batch inputs: {0}")]
    Input(String),

    /// Failure raised inside an agent invocation
    #[error("agent error: {0}")]
    Agent(String),

    /// Configuration and registry errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new pattern error
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Create a new batch-input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new agent error
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(msg.into())
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
