// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Hosted cluster client creation and kubeconfig utilities

use crate::constants::hosted;
use crate::error::{HyperOpsError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client,
};
use tracing::{info, instrument};
use url::Url;

/// Builds clients for clusters other than the one the operator runs in
#[async_trait]
pub trait ClusterConnector: Send + Sync {
    async fn connect(&self, kubeconfig: Kubeconfig) -> Result<Client>;
}

/// Connects using the credentials embedded in the kubeconfig
#[derive(Debug, Clone, Copy, Default)]
pub struct KubeconfigConnector;

#[async_trait]
impl ClusterConnector for KubeconfigConnector {
    async fn connect(&self, kubeconfig: Kubeconfig) -> Result<Client> {
        create_client_from_kubeconfig(kubeconfig).await
    }
}

/// Read the raw kubeconfig document from a hosted cluster's admin kubeconfig secret
#[instrument(skip(client))]
pub async fn get_kubeconfig(client: &Client, namespace: &str, secret_name: &str) -> Result<String> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    info!("Getting kubeconfig secret '{}/{}'...", namespace, secret_name);

    let Some(secret) = secrets.get_opt(secret_name).await? else {
        return Err(HyperOpsError::KubeconfigError(format!(
            "Kubeconfig secret {}/{} not found",
            namespace, secret_name
        )));
    };

    let Some(kubeconfig_data) = secret
        .data
        .as_ref()
        .and_then(|d| d.get(hosted::KUBECONFIG_KEY))
    else {
        return Err(HyperOpsError::KubeconfigError(format!(
            "Kubeconfig secret {}/{} does not contain '{}' key",
            namespace,
            secret_name,
            hosted::KUBECONFIG_KEY
        )));
    };

    String::from_utf8(kubeconfig_data.0.clone()).map_err(|e| {
        HyperOpsError::KubeconfigError(format!(
            "Failed to decode kubeconfig in {}/{}: {}",
            namespace, secret_name, e
        ))
    })
}

pub fn parse_kubeconfig(kubeconfig: &str) -> Result<Kubeconfig> {
    serde_yaml::from_str(kubeconfig)
        .map_err(|e| HyperOpsError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))
}

/// API server of the first cluster entry; the other entries are ignored
pub fn server_from_kubeconfig(kubeconfig: &Kubeconfig) -> Result<String> {
    let server = kubeconfig
        .clusters
        .first()
        .and_then(|c| c.cluster.as_ref())
        .and_then(|c| c.server.clone())
        .ok_or_else(|| {
            HyperOpsError::KubeconfigError("Kubeconfig has no cluster with a server".to_string())
        })?;

    Url::parse(&server).map_err(|e| {
        HyperOpsError::KubeconfigError(format!("Invalid server URL '{}': {}", server, e))
    })?;

    Ok(server)
}

/// Create a Kubernetes client from a parsed kubeconfig
pub async fn create_client_from_kubeconfig(kubeconfig: Kubeconfig) -> Result<Client> {
    let client_config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| HyperOpsError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    Client::try_from(client_config)
        .map_err(|e| HyperOpsError::KubeconfigError(format!("Failed to create client: {}", e)))
}
