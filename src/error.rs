use crate::config::ConfigError;
use crate::search::SubmitError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that end an indexing run.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("error walking directory {}: {source}", .root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to create worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("zinc client error: {0}")]
    Client(#[from] SubmitError),
    #[error("ingest task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
