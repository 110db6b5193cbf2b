// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HyperOpsError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Kubeconfig error: {0}")]
    KubeconfigError(String),

    #[error("Cluster credentials not ready: {0}")]
    CredentialsNotReady(String),

    #[error("Gave up writing {kind} {name} after {attempts} conflicting attempts")]
    ConflictRetriesExhausted {
        kind: String,
        name: String,
        attempts: u32,
    },

    #[error("Failed to serialize cluster config: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Object is missing {0}")]
    MissingObjectKey(String),
}

impl HyperOpsError {
    /// Whether the failure is expected to clear up on its own
    pub fn is_transient(&self) -> bool {
        matches!(self, HyperOpsError::CredentialsNotReady(_))
    }
}

pub type Result<T> = std::result::Result<T, HyperOpsError>;
