// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provisioning of the hyper-ops service account on a cluster and reading back its credentials

use crate::config::BootstrapConfig;
use crate::constants::identity;
use crate::error::{HyperOpsError, Result};
use crate::kubernetes::upsert::{create_or_update_with_retries, RetryBackoff};
use crate::types::ClusterCredentials;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use k8s_openapi::api::core::v1::{Secret, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleRef, Subject};
use kube::{api::ObjectMeta, Api, Client};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Ensure the service account, its cluster role binding and its token secret exist, then read
/// the token and CA back. Objects that already exist are left untouched.
///
/// Token secrets are populated asynchronously, so a freshly created one yields
/// [`HyperOpsError::CredentialsNotReady`]; the next reconcile picks up where this one stopped.
#[instrument(skip(client, backoff), fields(service_account = %config.service_account))]
pub async fn bootstrap_cluster(
    client: &Client,
    config: &BootstrapConfig,
    backoff: &RetryBackoff,
) -> Result<ClusterCredentials> {
    let service_accounts: Api<ServiceAccount> = Api::namespaced(client.clone(), &config.namespace);
    let op = create_or_update_with_retries(&service_accounts, &service_account(config), backoff, |_| {}).await?;
    debug!("Service account: {:?}", op);

    let bindings: Api<ClusterRoleBinding> = Api::all(client.clone());
    let op = create_or_update_with_retries(&bindings, &cluster_role_binding(config), backoff, |_| {}).await?;
    debug!("Cluster role binding: {:?}", op);

    let secrets: Api<Secret> = Api::namespaced(client.clone(), &config.namespace);
    let op = create_or_update_with_retries(&secrets, &token_secret(config), backoff, |_| {}).await?;
    debug!("Token secret: {:?}", op);

    let token_secret = secrets.get(&config.token_secret_name()).await?;
    let credentials = extract_credentials(&token_secret)?;

    info!("Service account credentials available");
    Ok(credentials)
}

fn service_account(config: &BootstrapConfig) -> ServiceAccount {
    ServiceAccount {
        metadata: ObjectMeta {
            name: Some(config.service_account.clone()),
            namespace: Some(config.namespace.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn cluster_role_binding(config: &BootstrapConfig) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(config.service_account.clone()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: config.cluster_role.clone(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: config.service_account.clone(),
            namespace: Some(config.namespace.clone()),
            ..Default::default()
        }]),
    }
}

fn token_secret(config: &BootstrapConfig) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(config.token_secret_name()),
            namespace: Some(config.namespace.clone()),
            annotations: Some(BTreeMap::from([(
                identity::SERVICE_ACCOUNT_NAME_ANNOTATION.to_string(),
                config.service_account.clone(),
            )])),
            ..Default::default()
        },
        type_: Some(identity::SERVICE_ACCOUNT_TOKEN_TYPE.to_string()),
        ..Default::default()
    }
}

fn extract_credentials(secret: &Secret) -> Result<ClusterCredentials> {
    let field = |key: &str| {
        secret
            .data
            .as_ref()
            .and_then(|d| d.get(key))
            .map(|v| v.0.as_slice())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| HyperOpsError::CredentialsNotReady(format!("{} not found", key)))
    };

    let token = field(identity::TOKEN_KEY)?;
    let ca = field(identity::CA_CERT_KEY)?;

    let bearer_token = String::from_utf8(token.to_vec()).map_err(|_| {
        HyperOpsError::CredentialsNotReady(format!("{} is not valid UTF-8", identity::TOKEN_KEY))
    })?;

    Ok(ClusterCredentials {
        bearer_token,
        ca_data: STANDARD.encode(ca),
    })
}
