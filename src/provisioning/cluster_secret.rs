// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Argo CD cluster secrets: building, writing and removing them

use crate::constants::{cluster_secret, labels};
use crate::error::Result;
use crate::kubernetes::upsert::{create_or_update_with_retries, is_not_found, OperationResult, RetryBackoff};
use crate::types::{ClusterType, ManagedCluster};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{
    api::{DeleteParams, ObjectMeta},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Labels of a cluster secret: the mirrored hyper-ops labels plus the type and the Argo CD marker
pub fn cluster_secret_labels(
    mirrored: BTreeMap<String, String>,
    cluster_type: ClusterType,
) -> BTreeMap<String, String> {
    let mut secret_labels = mirrored;
    secret_labels.insert(labels::TYPE.to_string(), cluster_type.to_string());
    secret_labels.insert(
        labels::ARGOCD_SECRET_TYPE.to_string(),
        labels::ARGOCD_SECRET_TYPE_CLUSTER.to_string(),
    );
    secret_labels
}

/// Build the secret Argo CD reads to register `cluster`. The type label follows the cluster.
pub fn build_cluster_secret(
    cluster: &ManagedCluster,
    namespace: &str,
    mirrored: BTreeMap<String, String>,
) -> Result<Secret> {
    let config = cluster.config_json()?;
    let secret_labels = cluster_secret_labels(mirrored, cluster.cluster_type);

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(cluster.name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(secret_labels),
            ..Default::default()
        },
        data: Some(BTreeMap::from([
            (
                cluster_secret::NAME_KEY.to_string(),
                ByteString(cluster.name.clone().into_bytes()),
            ),
            (
                cluster_secret::SERVER_KEY.to_string(),
                ByteString(cluster.server.clone().into_bytes()),
            ),
            (
                cluster_secret::CONFIG_KEY.to_string(),
                ByteString(config.into_bytes()),
            ),
        ])),
        type_: Some(cluster_secret::SECRET_TYPE.to_string()),
        ..Default::default()
    })
}

/// Create or update the cluster secret. Labels, data and type are owned by hyper-ops and
/// overwritten; other metadata on an existing secret is kept.
#[instrument(skip(client, secret, backoff), fields(secret = %format!("{}/{}", secret.namespace().unwrap_or_default(), secret.name_any())))]
pub async fn apply_cluster_secret(
    client: &Client,
    secret: &Secret,
    backoff: &RetryBackoff,
) -> Result<OperationResult> {
    let namespace = secret.namespace().unwrap_or_default();
    let secrets: Api<Secret> = Api::namespaced(client.clone(), &namespace);

    let op = create_or_update_with_retries(&secrets, secret, backoff, |existing| {
        existing.metadata.labels = secret.metadata.labels.clone();
        existing.data = secret.data.clone();
        existing.string_data = None;
        existing.type_ = secret.type_.clone();
    })
    .await?;

    info!("Argo CD cluster secret {:?}", op);
    Ok(op)
}

/// Remove a cluster secret. Returns whether there was anything to remove.
#[instrument(skip(client))]
pub async fn delete_cluster_secret(client: &Client, namespace: &str, name: &str) -> Result<bool> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    match secrets.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            info!("Deleted Argo CD cluster secret {}/{}", namespace, name);
            Ok(true)
        }
        Err(e) if is_not_found(&e) => {
            debug!("Argo CD cluster secret {}/{} already gone", namespace, name);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
