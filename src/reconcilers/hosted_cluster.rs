// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HostedCluster reconciler - registers the local cluster and opted-in hosted clusters with Argo CD.

use crate::config::Config;
use crate::constants::{local, requeue};
use crate::error::{HyperOpsError, Result};
use crate::kubernetes::client::{get_kubeconfig, parse_kubeconfig, server_from_kubeconfig};
use crate::kubernetes::{ClusterConnector, KubeconfigConnector};
use crate::provisioning::{
    apply_cluster_secret, bootstrap_cluster, build_cluster_secret, delete_cluster_secret,
};
use crate::reconcilers::filter;
use crate::types::{ClusterType, Enablement, HostedCluster, ManagedCluster};
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub struct HostedClusterReconciler {
    client: Client,
    config: Config,
    connector: Arc<dyn ClusterConnector>,
}

impl HostedClusterReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self::with_connector(client, config, Arc::new(KubeconfigConnector))
    }

    pub fn with_connector(client: Client, config: Config, connector: Arc<dyn ClusterConnector>) -> Self {
        Self {
            client,
            config,
            connector,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let hosted_clusters: Api<HostedCluster> = Api::all(self.client.clone());
        let context = Arc::new(self);

        Controller::new(hosted_clusters, filter::watcher_config())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled hosted cluster: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }

    /// Bring the Argo CD cluster secrets for one HostedCluster in line with its current state
    #[instrument(skip(self))]
    pub async fn reconcile_hosted_cluster(&self, namespace: &str, name: &str) -> Result<Action> {
        let hosted_clusters: Api<HostedCluster> = Api::namespaced(self.client.clone(), namespace);

        let Some(hosted_cluster) = hosted_clusters.get_opt(name).await? else {
            debug!("HostedCluster {}/{} not found, nothing to do", namespace, name);
            return Ok(Action::await_change());
        };

        // Decided per reconcile so concurrent reconciles never see each other's label
        let gitops_namespace = hosted_cluster
            .gitops_namespace(&self.config.default_gitops_namespace)
            .to_string();

        if hosted_cluster.is_deleting() {
            info!("HostedCluster {}/{} is being deleted", namespace, name);
            delete_cluster_secret(&self.client, &gitops_namespace, name).await?;
            return Ok(Action::await_change());
        }

        self.register_local_cluster(&gitops_namespace).await?;

        // A label removed after the event was queued counts as not opted in
        if hosted_cluster.enablement() != Enablement::Enabled {
            debug!(
                "HostedCluster {}/{} has hyper-ops disabled, skipping hosted cluster",
                namespace, name
            );
            return Ok(Action::await_change());
        }

        self.register_hosted_cluster(&hosted_cluster, &gitops_namespace)
            .await?;

        Ok(Action::await_change())
    }

    async fn register_local_cluster(&self, gitops_namespace: &str) -> Result<()> {
        let credentials =
            bootstrap_cluster(&self.client, &self.config.bootstrap, &self.config.retry).await?;
        let cluster = ManagedCluster::new(
            local::CLUSTER_NAME,
            local::SERVER,
            ClusterType::Local,
            credentials,
        );

        let secret = build_cluster_secret(&cluster, gitops_namespace, BTreeMap::new())?;
        apply_cluster_secret(&self.client, &secret, &self.config.retry).await?;
        Ok(())
    }

    async fn register_hosted_cluster(
        &self,
        hosted_cluster: &HostedCluster,
        gitops_namespace: &str,
    ) -> Result<()> {
        let name = hosted_cluster.name_any();
        let namespace = hosted_cluster
            .namespace()
            .ok_or_else(|| HyperOpsError::MissingObjectKey(format!("namespace on {}", name)))?;

        let raw = get_kubeconfig(
            &self.client,
            &namespace,
            &hosted_cluster.kubeconfig_secret_name(),
        )
        .await?;
        let kubeconfig = parse_kubeconfig(&raw)?;
        let server = server_from_kubeconfig(&kubeconfig)?;

        info!("Registering hosted cluster {} ({})", name, server);
        let hosted_client = self.connector.connect(kubeconfig).await?;
        let credentials =
            bootstrap_cluster(&hosted_client, &self.config.bootstrap, &self.config.retry).await?;
        let cluster = ManagedCluster::new(name, server, ClusterType::Hosted, credentials);

        let secret =
            build_cluster_secret(&cluster, gitops_namespace, hosted_cluster.mirrored_labels())?;
        apply_cluster_secret(&self.client, &secret, &self.config.retry).await?;
        Ok(())
    }
}

async fn reconcile(
    hosted_cluster: Arc<HostedCluster>,
    ctx: Arc<HostedClusterReconciler>,
) -> Result<Action> {
    let name = hosted_cluster.name_any();

    if !filter::admits(&hosted_cluster) {
        debug!("HostedCluster {} has no enabled label, skipping", name);
        return Ok(Action::await_change());
    }

    let namespace = hosted_cluster
        .namespace()
        .ok_or_else(|| HyperOpsError::MissingObjectKey(format!("namespace on {}", name)))?;

    ctx.reconcile_hosted_cluster(&namespace, &name).await
}

fn error_policy(
    _hosted_cluster: Arc<HostedCluster>,
    error: &HyperOpsError,
    _ctx: Arc<HostedClusterReconciler>,
) -> Action {
    if error.is_transient() {
        warn!("Reconciliation deferred: {}", error);
        return Action::requeue(Duration::from_secs(requeue::NOT_READY_SECS));
    }

    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(requeue::ERROR_SECS))
}
