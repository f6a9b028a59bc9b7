//! Gateway error types

use thiserror::Error;

/// Errors that can occur in the chat gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Session not found in the session store
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session already exists in the session store
    #[error("Session already exists: {0}")]
    SessionExists(String),

    /// Session store operation failed
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Agent key is not in the configured registry
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Failed to construct the bridge's execution context
    #[error("Bridge setup failed: {0}")]
    BridgeSetup(String),

    /// The operation driven by the bridge faulted
    #[error("Bridge fault: {0}")]
    BridgeFault(String),

    /// Agent behavior failed while producing events
    #[error("Agent execution error: {0}")]
    AgentExecution(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        GatewayError::Other(msg.into())
    }

    /// Create an agent execution error
    pub fn agent(msg: impl Into<String>) -> Self {
        GatewayError::AgentExecution(msg.into())
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
