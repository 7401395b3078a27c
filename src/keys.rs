// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `namespace/name` keys identifying reconciled objects.

use crate::error::{BindwardenError, Result};
use kube::api::ObjectMeta;

/// Build the key for an object from whatever metadata it still carries.
///
/// Only `name` and `namespace` are consulted, so the final state of a deleted
/// object resolves as long as those two survived.
pub fn object_key(meta: &ObjectMeta) -> Result<String> {
    let name = meta
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| BindwardenError::InvalidKey("object has no name".to_string()))?;

    match meta.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        Some(namespace) => Ok(format!("{}/{}", namespace, name)),
        None => Err(BindwardenError::InvalidKey(format!(
            "object {} has no namespace",
            name
        ))),
    }
}

/// Split a `namespace/name` key into its parts
pub fn split_key(key: &str) -> Result<(&str, &str)> {
    match key.split_once('/') {
        Some((namespace, name))
            if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((namespace, name))
        }
        _ => Err(BindwardenError::InvalidKey(format!(
            "unexpected key format: {:?}",
            key
        ))),
    }
}
