// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watched and produced resource types.

pub mod hosted_cluster;
pub mod managed_cluster;

pub use hosted_cluster::{Enablement, HostedCluster};
pub use managed_cluster::{ClusterCredentials, ClusterType, ManagedCluster};
