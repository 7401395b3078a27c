// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

/// The subset of a Shoot's spec the controller reads. Shoots are never written.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "core.gardener.cloud", version = "v1beta1", kind = "Shoot")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    /// Name of the SecretBinding in the Shoot's namespace holding its credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_binding_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_profile_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Shoot {
    /// Check if this Shoot references the SecretBinding `namespace/name`
    pub fn references_binding(&self, namespace: &str, name: &str) -> bool {
        self.namespace().as_deref() == Some(namespace)
            && self.spec.secret_binding_name.as_deref() == Some(name)
    }

    /// The `namespace/name` identity of this Shoot
    pub fn key(&self) -> String {
        format!("{}/{}", self.namespace().unwrap_or_default(), self.name_any())
    }
}
