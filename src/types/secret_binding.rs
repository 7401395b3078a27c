// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::crd;
use k8s_openapi::api::core::v1::{ObjectReference, SecretReference};
use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::core::TypeMeta;
use kube::{Resource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A SecretBinding references a Secret holding infrastructure credentials.
///
/// Unlike most custom resources it has no `spec`: `secretRef` sits next to
/// `metadata`, so the [`Resource`] impl is written by hand.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecretBinding {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    pub metadata: ObjectMeta,
    pub secret_ref: SecretReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotas: Option<Vec<ObjectReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<SecretBindingProvider>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SecretBindingProvider {
    #[serde(rename = "type")]
    pub type_: String,
}

impl Resource for SecretBinding {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "SecretBinding".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        crd::GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        crd::VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "secretbindings".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl SecretBinding {
    /// Create a binding in `namespace` pointing at the Secret `secret_namespace/secret_name`
    pub fn new(namespace: &str, name: &str, secret_namespace: &str, secret_name: &str) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: Self::api_version(&()).into_owned(),
                kind: Self::kind(&()).into_owned(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            secret_ref: SecretReference {
                name: Some(secret_name.to_string()),
                namespace: Some(secret_namespace.to_string()),
            },
            ..Default::default()
        }
    }

    /// Namespace of the referenced Secret, defaulting to the binding's own
    pub fn secret_namespace(&self) -> String {
        self.secret_ref
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .or_else(|| self.namespace())
            .unwrap_or_default()
    }

    /// Name of the referenced Secret
    pub fn secret_name(&self) -> String {
        self.secret_ref.name.clone().unwrap_or_default()
    }

    /// Whether deletion of this binding has been requested
    pub fn is_terminating(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// The `namespace/name` identity of this binding
    pub fn key(&self) -> String {
        format!("{}/{}", self.namespace().unwrap_or_default(), self.name_any())
    }
}
