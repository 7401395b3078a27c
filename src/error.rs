// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindwardenError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Conflict updating {kind} {key}: object has been modified")]
    Conflict { kind: String, key: String },

    #[error("Secret {namespace}/{name} referenced by SecretBinding {binding} not found")]
    SecretNotFound {
        binding: String,
        namespace: String,
        name: String,
    },

    #[error("SecretBinding {binding} still has references: {shoots:?}")]
    DeletionBlocked { binding: String, shoots: Vec<String> },
}

impl BindwardenError {
    /// Whether this failure is the expected "still referenced" condition
    pub fn is_deletion_blocked(&self) -> bool {
        matches!(self, BindwardenError::DeletionBlocked { .. })
    }
}

pub type Result<T> = std::result::Result<T, BindwardenError>;
