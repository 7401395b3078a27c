// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! SecretBinding controller - runs the reconciler on a kube-runtime
//! [`Controller`] and schedules failed bindings again after a per-key backoff.

use crate::config::Config;
use crate::controllers::retry::RetryTracker;
use crate::error::{BindwardenError, Result};
use crate::keys::object_key;
use crate::kubernetes::EventPublisher;
use crate::reconcilers::SecretBindingReconciler;
use crate::types::SecretBinding;
use futures::channel::mpsc;
use futures::{SinkExt, Stream, StreamExt};
use kube::runtime::controller::{self, Action};
use kube::runtime::Controller;
use kube::{Api, Client};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

/// State shared by every reconcile and error policy call
pub struct Context {
    reconciler: SecretBindingReconciler,
    retries: RetryTracker,
}

impl Context {
    pub fn new(reconciler: SecretBindingReconciler, retries: RetryTracker) -> Self {
        Self {
            reconciler,
            retries,
        }
    }

    pub fn retries(&self) -> &RetryTracker {
        &self.retries
    }
}

pub struct SecretBindingController {
    client: Client,
    publisher: Arc<dyn EventPublisher>,
    config: Config,
}

impl SecretBindingController {
    pub fn new(client: Client, publisher: Arc<dyn EventPublisher>, config: Config) -> Self {
        Self {
            client,
            publisher,
            config,
        }
    }

    /// Run until the watch ends or a termination signal arrives. Reconciles
    /// already in flight are allowed to finish.
    pub async fn run(self) -> anyhow::Result<()> {
        let bindings: Api<SecretBinding> = Api::all(self.client.clone());
        let context = Arc::new(Context::new(
            SecretBindingReconciler::new(self.client, self.publisher),
            RetryTracker::new(self.config.retry_policy),
        ));

        let mut bindings_controller = Controller::new(bindings, WatcherConfig::default())
            .with_config(controller::Config::default().concurrency(self.config.concurrent_syncs))
            .shutdown_on_signal();
        if let Some(period) = self.config.resync_period {
            bindings_controller = bindings_controller.reconcile_all_on(resync_ticks(period));
        }

        info!(
            "Reconciling up to {} SecretBindings at a time (retry policy {:?})",
            self.config.concurrent_syncs, self.config.retry_policy
        );

        bindings_controller
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok((binding, _)) => debug!("Reconciled SecretBinding {}", binding),
                    // Already logged and scheduled by the error policy
                    Err(controller::Error::ReconcilerFailed(e, binding)) => {
                        debug!("Reconciling SecretBinding {} failed: {}", binding, e)
                    }
                    Err(controller::Error::ObjectNotFound(binding)) => {
                        debug!("SecretBinding {} is no longer cached", binding)
                    }
                    Err(e) => warn!("SecretBinding controller error: {}", e),
                }
            })
            .await;

        info!("SecretBinding controller stopped");
        Ok(())
    }
}

/// Reconcile a SecretBinding by its key. The reconciler reads the binding
/// again from the API, so the cached copy only identifies it.
pub async fn reconcile(binding: Arc<SecretBinding>, ctx: Arc<Context>) -> Result<Action> {
    let key = object_key(&binding.metadata)?;
    ctx.reconciler.reconcile_key(&key).await?;
    ctx.retries.forget(&key);
    Ok(Action::await_change())
}

/// Schedule a failed SecretBinding again after its backoff. Bindings without
/// a usable key are dropped since no retry can fix them.
pub fn error_policy(binding: Arc<SecretBinding>, error: &BindwardenError, ctx: Arc<Context>) -> Action {
    let key = match (object_key(&binding.metadata), error) {
        (Ok(key), BindwardenError::InvalidKey(reason)) => {
            error!("Dropping key {:?}: {}", key, reason);
            ctx.retries.forget(&key);
            return Action::await_change();
        }
        (Ok(key), _) => key,
        (Err(e), _) => {
            error!("Couldn't get key for SecretBinding {:?}: {}", binding.metadata, e);
            return Action::await_change();
        }
    };

    let delay = ctx.retries.record_failure(&key);
    if error.is_deletion_blocked() {
        info!("{}, retrying in {:?}", error, delay);
    } else {
        warn!("Failed to reconcile SecretBinding {}: {}, retrying in {:?}", key, error, delay);
    }
    Action::requeue(delay)
}

/// Yields once per `period`, starting one period from now
fn resync_ticks(period: Duration) -> impl Stream<Item = ()> + Send + Sync + 'static {
    let (mut ticks, rx) = mpsc::channel(0);
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            debug!("Resyncing all SecretBindings");
            if ticks.send(()).await.is_err() {
                break;
            }
        }
    });
    rx
}
