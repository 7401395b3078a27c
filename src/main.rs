// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bindwarden::config::Config;
use bindwarden::controllers::SecretBindingController;
use bindwarden::kubernetes::{wait_for_crds, KubeEventPublisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting SecretBinding controller");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: concurrent_syncs={}, retry_policy={:?}, resync_period={:?}",
        config.concurrent_syncs, config.retry_policy, config.resync_period
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Wait for the Gardener CRDs before watching them
    info!("Waiting for Gardener CRDs to become available...");
    wait_for_crds(&client).await?;

    let publisher = Arc::new(KubeEventPublisher::new(client.clone(), &config.controller_name));
    let controller = SecretBindingController::new(client, publisher, config);

    controller.run().await
}
