// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Finalizer updates on arbitrary namespaced objects.
//!
//! Every write is a `replace` carrying the resource version the caller read,
//! so a concurrent modification surfaces as [`BindwardenError::Conflict`]
//! instead of silently dropping another controller's token.

use crate::error::{BindwardenError, Result};
use kube::{api::PostParams, Api, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Check if an object carries the given finalizer token
pub fn has_finalizer<K: Resource>(obj: &K, token: &str) -> bool {
    obj.meta()
        .finalizers
        .as_ref()
        .is_some_and(|finalizers| finalizers.iter().any(|f| f == token))
}

/// Add a finalizer token unless already present. Returns whether a write was issued.
#[instrument(skip(api, obj), fields(object = %object_key(obj)))]
pub async fn ensure_finalizer<K>(api: &Api<K>, obj: &K, token: &str) -> Result<bool>
where
    K: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + Debug,
{
    if has_finalizer(obj, token) {
        debug!("Finalizer {} already present", token);
        return Ok(false);
    }

    let mut updated = obj.clone();
    updated
        .meta_mut()
        .finalizers
        .get_or_insert_with(Vec::new)
        .push(token.to_string());

    replace(api, &updated).await?;
    info!("Added finalizer {}", token);
    Ok(true)
}

/// Remove a finalizer token if present. Returns whether the object was changed.
///
/// An object that disappeared before the write is treated as done.
#[instrument(skip(api, obj), fields(object = %object_key(obj)))]
pub async fn remove_finalizer<K>(api: &Api<K>, obj: &K, token: &str) -> Result<bool>
where
    K: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + Debug,
{
    if !has_finalizer(obj, token) {
        debug!("Finalizer {} already absent", token);
        return Ok(false);
    }

    let mut updated = obj.clone();
    let finalizers = updated.meta_mut().finalizers.take().unwrap_or_default();
    let remaining: Vec<String> = finalizers.into_iter().filter(|f| f != token).collect();
    updated.meta_mut().finalizers = (!remaining.is_empty()).then_some(remaining);

    match replace(api, &updated).await {
        Ok(()) => {
            info!("Removed finalizer {}", token);
            Ok(true)
        }
        Err(BindwardenError::KubeError(kube::Error::Api(err))) if err.code == 404 => {
            debug!("Object already gone, nothing to remove");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

async fn replace<K>(api: &Api<K>, obj: &K) -> Result<()>
where
    K: Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + Debug,
{
    match api.replace(&obj.name_any(), &PostParams::default(), obj).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(err)) if err.code == 409 => Err(BindwardenError::Conflict {
            kind: K::kind(&()).into_owned(),
            key: object_key(obj),
        }),
        Err(e) => Err(e.into()),
    }
}

fn object_key<K: Resource>(obj: &K) -> String {
    match obj.namespace() {
        Some(namespace) => format!("{}/{}", namespace, obj.name_any()),
        None => obj.name_any(),
    }
}
