// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::Serialize;
use std::fmt;

/// Bearer token and CA read back from a bootstrapped cluster
#[derive(Clone, PartialEq, Eq)]
pub struct ClusterCredentials {
    pub bearer_token: String,
    /// Base64 encoded CA certificate
    pub ca_data: String,
}

impl fmt::Debug for ClusterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterCredentials")
            .field("bearer_token", &"<redacted>")
            .field("ca_data", &self.ca_data)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterType {
    Local,
    Hosted,
}

impl ClusterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterType::Local => "local",
            ClusterType::Hosted => "hosted",
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `config` entry of an Argo CD cluster secret
#[derive(Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    pub bearer_token: String,
    pub tls_client_config: TlsClientConfig,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsClientConfig {
    pub ca_data: String,
}

/// A cluster ready to be registered with Argo CD. Rebuilt on every reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedCluster {
    pub name: String,
    pub server: String,
    pub cluster_type: ClusterType,
    pub config: ClusterConfig,
}

impl fmt::Debug for ClusterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("bearer_token", &"<redacted>")
            .field("tls_client_config", &self.tls_client_config)
            .finish()
    }
}

impl ManagedCluster {
    pub fn new(
        name: impl Into<String>,
        server: impl Into<String>,
        cluster_type: ClusterType,
        credentials: ClusterCredentials,
    ) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            cluster_type,
            config: ClusterConfig {
                bearer_token: credentials.bearer_token,
                tls_client_config: TlsClientConfig {
                    ca_data: credentials.ca_data,
                },
            },
        }
    }

    pub fn config_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.config)
    }
}
