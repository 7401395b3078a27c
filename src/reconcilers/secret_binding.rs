// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! SecretBinding reconciler - protects bindings and their Secrets with
//! finalizers and releases them once no Shoot references the binding.
//!
//! Every call re-derives its action from the binding's current deletion
//! timestamp and finalizers, never from the event that triggered it, so
//! re-running a reconciliation from scratch is always safe.

use crate::constants::{events, finalizers};
use crate::error::{BindwardenError, Result};
use crate::keys::split_key;
use crate::kubernetes::{ensure_finalizer, has_finalizer, remove_finalizer, EventPublisher};
use crate::reconcilers::associations::determine_shoot_associations;
use crate::types::SecretBinding;
use k8s_openapi::api::core::v1::Secret;
use kube::runtime::events::EventType;
use kube::{Api, Client, Resource};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub struct SecretBindingReconciler {
    client: Client,
    publisher: Arc<dyn EventPublisher>,
}

impl SecretBindingReconciler {
    pub fn new(client: Client, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { client, publisher }
    }

    /// Reconcile the SecretBinding identified by a `namespace/name` key.
    ///
    /// A binding that no longer exists is a success. Any error means the key
    /// should be retried later.
    #[instrument(skip(self))]
    pub async fn reconcile_key(&self, key: &str) -> Result<()> {
        let (namespace, name) = split_key(key)?;
        let bindings: Api<SecretBinding> = Api::namespaced(self.client.clone(), namespace);

        let Some(binding) = bindings.get_opt(name).await? else {
            debug!("Skipping because SecretBinding has been deleted");
            return Ok(());
        };

        if !binding.is_terminating() {
            return self.ensure_protected(&bindings, &binding).await;
        }

        if !has_finalizer(&binding, finalizers::BINDING) {
            debug!("SecretBinding is terminating without our finalizer, nothing to do");
            return Ok(());
        }

        self.release(&bindings, &binding).await
    }

    /// Put our finalizers on a live binding and on the Secret it references
    async fn ensure_protected(
        &self,
        bindings: &Api<SecretBinding>,
        binding: &SecretBinding,
    ) -> Result<()> {
        ensure_finalizer(bindings, binding, finalizers::BINDING)
            .await
            .inspect_err(|e| error!("Could not add finalizer to SecretBinding: {}", e))?;

        let (secrets, secret) = self.referenced_secret(binding).await?;
        let Some(secret) = secret else {
            let err = BindwardenError::SecretNotFound {
                binding: binding.key(),
                namespace: binding.secret_namespace(),
                name: binding.secret_name(),
            };
            error!("{}", err);
            return Err(err);
        };

        ensure_finalizer(&secrets, &secret, finalizers::SECRET)
            .await
            .inspect_err(|e| {
                error!("Could not add finalizer to Secret referenced in SecretBinding: {}", e)
            })?;

        Ok(())
    }

    /// Release a terminating binding unless Shoots still reference it
    async fn release(&self, bindings: &Api<SecretBinding>, binding: &SecretBinding) -> Result<()> {
        let associated = determine_shoot_associations(&self.client, binding)
            .await
            .inspect_err(|e| error!("Could not determine Shoot associations: {}", e))?;

        if !associated.is_empty() {
            let message = format!(
                "Can't delete SecretBinding, because the following Shoots are still referencing it: [{}]",
                associated.join(", ")
            );
            info!("{}", message);
            self.publisher
                .publish(
                    &binding.object_ref(&()),
                    EventType::Normal,
                    events::RESOURCE_REFERENCED,
                    events::ACTION_DELETE,
                    Some(message),
                )
                .await;

            return Err(BindwardenError::DeletionBlocked {
                binding: binding.key(),
                shoots: associated,
            });
        }

        info!("No Shoots are referencing the SecretBinding. Deletion accepted.");

        // The Secret loses its protection strictly before the binding does
        if let (secrets, Some(secret)) = self.referenced_secret(binding).await? {
            remove_finalizer(&secrets, &secret, finalizers::SECRET)
                .await
                .inspect_err(|e| error!("Could not remove finalizer from Secret: {}", e))?;
        }

        remove_finalizer(bindings, binding, finalizers::BINDING)
            .await
            .inspect_err(|e| error!("Could not remove finalizer from SecretBinding: {}", e))?;

        Ok(())
    }

    async fn referenced_secret(
        &self,
        binding: &SecretBinding,
    ) -> Result<(Api<Secret>, Option<Secret>)> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &binding.secret_namespace());
        let name = binding.secret_name();
        if name.is_empty() {
            return Ok((secrets, None));
        }

        let secret = secrets.get_opt(&name).await?;
        Ok((secrets, secret))
    }
}
