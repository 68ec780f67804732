// error.rs — Error types for the simulation layer.

use rescue_goal::RescueError;
use thiserror::Error;

/// Errors that can occur while loading inputs or driving a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// The simulation config file is not valid TOML for `SimulationConfig`.
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    /// The event script is not a JSON array of optional disaster events.
    #[error("invalid event script {path}: {source}")]
    ScriptParse {
        path: String,
        source: serde_json::Error,
    },

    /// The config parsed but its values are unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The rescue agent rejected an operation.
    #[error(transparent)]
    Goal(#[from] RescueError),
}
