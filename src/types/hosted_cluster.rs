// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{hosted, labels};
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The subset of the HyperShift HostedCluster we care about. Unknown fields are ignored.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "hypershift.openshift.io", version = "v1beta1", kind = "HostedCluster")]
#[kube(namespaced)]
#[kube(status = "HostedClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct HostedClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct Release {
    pub image: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct Platform {
    #[serde(rename = "type")]
    pub platform_type: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostedClusterStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<SecretReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct SecretReference {
    pub name: String,
}

/// How a HostedCluster opted in through the enabled label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    /// No enabled label at all; the event filter drops these
    Unlabelled,
    /// Labelled "false": only the local cluster is registered
    Disabled,
    Enabled,
}

impl HostedCluster {
    pub fn enablement(&self) -> Enablement {
        match self.labels().get(labels::ENABLED) {
            None => Enablement::Unlabelled,
            Some(v) if v == labels::DISABLED_VALUE => Enablement::Disabled,
            Some(_) => Enablement::Enabled,
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// Namespace the Argo CD secret for this cluster goes to
    pub fn gitops_namespace<'a>(&'a self, default: &'a str) -> &'a str {
        self.labels()
            .get(labels::GITOPS_NAMESPACE)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
    }

    /// Get the name of the admin kubeconfig secret for this cluster
    pub fn kubeconfig_secret_name(&self) -> String {
        self.status
            .as_ref()
            .and_then(|s| s.kubeconfig.as_ref())
            .map(|r| r.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{}{}", self.name_any(), hosted::KUBECONFIG_SECRET_SUFFIX))
    }

    /// Labels that carry the hyper-ops prefix; everything else is dropped
    pub fn mirrored_labels(&self) -> BTreeMap<String, String> {
        self.labels()
            .iter()
            .filter(|(k, _)| k.starts_with(labels::PREFIX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
