// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admission of HostedCluster events into the work queue.

use crate::constants::labels;
use crate::types::HostedCluster;
use kube::ResourceExt;
use kube_runtime::watcher::Config as WatcherConfig;

/// Only HostedClusters carrying the enabled label key are watched at all. The value is not
/// looked at here; "false" is handled by the reconciler.
pub fn watcher_config() -> WatcherConfig {
    WatcherConfig::default().labels(labels::ENABLED)
}

/// Same rule as [`watcher_config`], applied to an object already in hand
pub fn admits(hosted_cluster: &HostedCluster) -> bool {
    hosted_cluster.labels().contains_key(labels::ENABLED)
}
