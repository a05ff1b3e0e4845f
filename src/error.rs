//! Host error types.

use std::path::PathBuf;

use uuid::Uuid;

/// Failure reported by a persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },
}

/// Failure that stops the host before or after a replay.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read scenario {path}: {source}")]
    ReadScenario {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario {path}: {source}")]
    ParseScenario {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("flush task failed: {0}")]
    FlushTask(#[from] tokio::task::JoinError),
}
