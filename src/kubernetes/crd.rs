// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::constants::hosted::{GROUP, KIND, VERSION};
use crate::error::Result;
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Wait for the HostedCluster CRD to become available in the cluster.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_hosted_cluster_crd(client: &Client) -> Result<()> {
    let mut interval = POLL_INTERVAL_SECS;

    loop {
        match check_hosted_cluster_crd_exists(client).await {
            Ok(true) => {
                info!("{} CRD ({}/{}) is available", KIND, GROUP, VERSION);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "{} CRD ({}/{}) not yet available, waiting {} seconds...",
                    KIND, GROUP, VERSION, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for {} CRD: {}, retrying in {} seconds...",
                    KIND, e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;

        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

async fn check_hosted_cluster_crd_exists(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[GROUP])
        .run()
        .await?;

    let exists = discovery
        .groups()
        .filter(|group| group.name() == GROUP)
        .flat_map(|group| group.recommended_resources())
        .any(|(ar, _)| ar.kind == KIND && ar.version == VERSION);
    Ok(exists)
}
