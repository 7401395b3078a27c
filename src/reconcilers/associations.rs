// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery of Shoots that still depend on a SecretBinding.
//!
//! Shoots name their binding but bindings keep no back-reference, so the
//! association set is computed by listing every Shoot and filtering. Callers
//! must not cache the result: a stale empty set would let a referenced
//! binding be released.

use crate::error::Result;
use crate::types::{SecretBinding, Shoot};
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{debug, instrument};

/// List the `namespace/name` of every Shoot referencing the binding, sorted.
///
/// A failed list is returned as an error, never as "no dependents".
#[instrument(skip(client, binding), fields(binding = %binding.key()))]
pub async fn determine_shoot_associations(
    client: &Client,
    binding: &SecretBinding,
) -> Result<Vec<String>> {
    let shoots: Api<Shoot> = Api::all(client.clone());
    let shoot_list = shoots.list(&ListParams::default()).await?;

    let associated = shoots_referencing(binding, &shoot_list.items);
    debug!("Found {} associated Shoots", associated.len());
    Ok(associated)
}

/// Keep the Shoots in the binding's namespace that name the binding
pub fn shoots_referencing(binding: &SecretBinding, shoots: &[Shoot]) -> Vec<String> {
    let namespace = binding.namespace().unwrap_or_default();
    let name = binding.name_any();

    let mut associated: Vec<String> = shoots
        .iter()
        .filter(|shoot| shoot.references_binding(&namespace, &name))
        .map(Shoot::key)
        .collect();
    associated.sort();
    associated
}
