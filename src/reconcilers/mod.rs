// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes reconcilers that react to watch events.

pub mod filter;
pub mod hosted_cluster;

pub use hosted_cluster::HostedClusterReconciler;
