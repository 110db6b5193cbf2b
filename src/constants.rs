// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes label keys used by hyper-ops
pub mod labels {
    /// Every label owned by hyper-ops starts with this prefix
    pub const PREFIX: &str = "hyper-ops.cloudmonkey.org/";
    /// Presence opts a HostedCluster in; "false" keeps it watched but skips the hosted cluster
    pub const ENABLED: &str = "hyper-ops.cloudmonkey.org/enabled";
    /// Namespace where the Argo CD cluster secret is written (optional)
    pub const GITOPS_NAMESPACE: &str = "hyper-ops.cloudmonkey.org/gitops-namespace";
    /// Marks a generated secret as belonging to the local or a hosted cluster
    pub const TYPE: &str = "hyper-ops.cloudmonkey.org/type";
    /// Value of the enabled label that disables hosted cluster registration
    pub const DISABLED_VALUE: &str = "false";

    /// Label Argo CD uses to discover cluster secrets
    pub const ARGOCD_SECRET_TYPE: &str = "argocd.argoproj.io/secret-type";
    pub const ARGOCD_SECRET_TYPE_CLUSTER: &str = "cluster";
}

/// Defaults for the GitOps side
pub mod gitops {
    pub const DEFAULT_NAMESPACE: &str = "openshift-gitops";
}

/// The cluster the operator itself runs in
pub mod local {
    pub const CLUSTER_NAME: &str = "in-cluster-local";
    pub const SERVER: &str = "https://kubernetes.default.svc";
}

/// Identity objects provisioned on every registered cluster
pub mod identity {
    pub const NAMESPACE: &str = "kube-system";
    pub const SERVICE_ACCOUNT: &str = "hyper-ops-admin";
    pub const CLUSTER_ROLE: &str = "cluster-admin";
    pub const TOKEN_SECRET_SUFFIX: &str = "-token";

    pub const SERVICE_ACCOUNT_NAME_ANNOTATION: &str = "kubernetes.io/service-account.name";
    pub const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";
    pub const TOKEN_KEY: &str = "token";
    pub const CA_CERT_KEY: &str = "ca.crt";
}

/// HostedCluster resources and their kubeconfig secrets
pub mod hosted {
    pub const GROUP: &str = "hypershift.openshift.io";
    pub const VERSION: &str = "v1beta1";
    pub const KIND: &str = "HostedCluster";
    pub const KUBECONFIG_SECRET_SUFFIX: &str = "-admin-kubeconfig";
    pub const KUBECONFIG_KEY: &str = "kubeconfig";
}

/// Keys of the Argo CD cluster secret payload
pub mod cluster_secret {
    pub const NAME_KEY: &str = "name";
    pub const SERVER_KEY: &str = "server";
    pub const CONFIG_KEY: &str = "config";
    pub const SECRET_TYPE: &str = "Opaque";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Requeue delays used by the error policy
pub mod requeue {
    pub const NOT_READY_SECS: u64 = 10;
    pub const ERROR_SECS: u64 = 60;
}
