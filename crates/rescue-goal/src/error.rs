// error.rs — Error types for the rescue agent subsystem.

use thiserror::Error;

/// Errors that can occur while driving a rescue agent.
///
/// None of these are fatal: the state machine reports them and keeps its
/// previous state, and notification failures never reach the caller.
#[derive(Debug, Error)]
pub enum RescueError {
    /// The requested state is not reachable from the current state.
    #[error("invalid transition from {from} to {to} for agent {agent_id}")]
    InvalidTransition {
        agent_id: String,
        from: String,
        to: String,
    },

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize an event.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}
