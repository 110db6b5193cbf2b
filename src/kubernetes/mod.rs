// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery, client creation, and conflict-safe writes.

pub mod client;
pub mod crd;
pub mod upsert;

pub use client::{ClusterConnector, KubeconfigConnector};
pub use crd::wait_for_hosted_cluster_crd;
pub use upsert::{create_or_update_with_retries, OperationResult, RetryBackoff};
