// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster bootstrap and Argo CD cluster secret management.

pub mod bootstrap;
pub mod cluster_secret;

pub use bootstrap::bootstrap_cluster;
pub use cluster_secret::{
    apply_cluster_secret, build_cluster_secret, cluster_secret_labels, delete_cluster_secret,
};
