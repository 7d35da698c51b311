use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The remote command ran and failed. Holds what it printed.
    #[error("{0}")]
    RemoteExecution(String),

    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("kubeconfig has no entry at clusters[{index}]")]
    MissingCluster { index: usize },

    #[error("clusters[{index}].cluster is not a mapping")]
    MalformedCluster { index: usize },

    #[error("{0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl FetchError {
    /// Failures that come from the remote side rather than from the document.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FetchError::RemoteExecution(_) | FetchError::Spawn { .. }
        )
    }
}
