//! Error types for the banking agent services

use thiserror::Error;

/// Result type alias for orchestrator and agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {

    // =============================
    // Routing Errors
    // =============================

    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Routing error: {0}")]
    RoutingError(String),

    #[error("Agent unreachable: {0}")]
    AgentUnreachable(String),

    #[error("Malformed agent reply: {0}")]
    MalformedReply(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
