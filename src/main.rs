// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use hyper_ops::config::Config;
use hyper_ops::kubernetes::wait_for_hosted_cluster_crd;
use hyper_ops::reconcilers::HostedClusterReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting hyper-ops operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: default_gitops_namespace={}, bootstrap={}/{}",
        config.default_gitops_namespace,
        config.bootstrap.namespace,
        config.bootstrap.service_account
    );

    let client = Client::try_default().await?;
    info!("Connected to management cluster");

    // The watch fails outright without the HostedCluster CRD
    info!("Waiting for HostedCluster CRD to become available...");
    wait_for_hosted_cluster_crd(&client).await?;

    HostedClusterReconciler::new(client, config).run().await?;

    warn!("HostedCluster reconciler stopped unexpectedly");
    Ok(())
}
