// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{gitops, identity};
use crate::kubernetes::upsert::RetryBackoff;
use anyhow::Result;
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace for Argo CD cluster secrets when a HostedCluster does not name one
    pub default_gitops_namespace: String,
    pub bootstrap: BootstrapConfig,
    pub retry: RetryBackoff,
}

/// Names of the identity objects provisioned on each registered cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub namespace: String,
    pub service_account: String,
    pub cluster_role: String,
}

impl BootstrapConfig {
    /// The token secret is looked up by this derived name, not by whatever the API returned
    pub fn token_secret_name(&self) -> String {
        format!("{}{}", self.service_account, identity::TOKEN_SECRET_SUFFIX)
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            namespace: identity::NAMESPACE.to_string(),
            service_account: identity::SERVICE_ACCOUNT.to_string(),
            cluster_role: identity::CLUSTER_ROLE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_gitops_namespace: gitops::DEFAULT_NAMESPACE.to_string(),
            bootstrap: BootstrapConfig::default(),
            retry: RetryBackoff::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = BootstrapConfig::default();

        Ok(Config {
            default_gitops_namespace: env_or("GITOPS_NAMESPACE", gitops::DEFAULT_NAMESPACE),
            bootstrap: BootstrapConfig {
                namespace: env_or("BOOTSTRAP_NAMESPACE", &defaults.namespace),
                service_account: env_or("BOOTSTRAP_SERVICE_ACCOUNT", &defaults.service_account),
                cluster_role: env_or("BOOTSTRAP_CLUSTER_ROLE", &defaults.cluster_role),
            },
            retry: RetryBackoff::default(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_secret_name_is_derived_from_service_account() {
        let config = BootstrapConfig {
            service_account: "robot".to_string(),
            ..Default::default()
        };

        assert_eq!(config.token_secret_name(), "robot-token");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.default_gitops_namespace, "openshift-gitops");
        assert_eq!(config.bootstrap.namespace, "kube-system");
        assert_eq!(config.bootstrap.service_account, "hyper-ops-admin");
        assert_eq!(config.bootstrap.cluster_role, "cluster-admin");
        assert_eq!(config.bootstrap.token_secret_name(), "hyper-ops-admin-token");
    }
}
