// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// Kubeconfig for a hosted cluster whose first entry points at api.foo
pub const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
- name: cluster
  cluster:
    server: https://api.foo.example.com:6443
    certificate-authority-data: Y2E=
- name: other
  cluster:
    server: https://api.other.example.com:6443
users:
- name: admin
  user:
    token: admin-token
contexts:
- name: admin
  context:
    cluster: cluster
    user: admin
current-context: admin
"#;

/// A request the mock received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// The request body as a typed object
    pub fn object<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Responses = HashMap<(String, String), VecDeque<(u16, String)>>;

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Several responses for the same method and path are served in order; the last one repeats.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<Responses>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for the given method and path
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });

            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("object", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock secret JSON response
pub fn secret_json(namespace: &str, name: &str, data: &[(&str, &[u8])]) -> String {
    serde_json::to_string(&Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            resource_version: Some("1".to_string()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| (k.to_string(), ByteString(v.to_vec())))
                .collect::<BTreeMap<_, _>>(),
        ),
        ..Default::default()
    })
    .unwrap()
}

/// Serialize any object as a mock response
pub fn object_json<T: serde::Serialize>(object: &T) -> String {
    serde_json::to_string(object).unwrap()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 conflict response
pub fn conflict_json(name: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!("the object \"{}\" has been modified", name),
    )
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Serve identity objects as if hyper-ops had already bootstrapped this cluster
pub fn with_provisioned_identity(mock: MockService, token: &[u8], ca: &[u8]) -> MockService {
    let service_account = serde_json::json!({
        "apiVersion": "v1",
        "kind": "ServiceAccount",
        "metadata": { "name": "hyper-ops-admin", "namespace": "kube-system", "resourceVersion": "1" }
    });
    let binding = serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRoleBinding",
        "metadata": { "name": "hyper-ops-admin", "resourceVersion": "1" },
        "roleRef": { "apiGroup": "rbac.authorization.k8s.io", "kind": "ClusterRole", "name": "cluster-admin" },
        "subjects": [{ "kind": "ServiceAccount", "name": "hyper-ops-admin", "namespace": "kube-system" }]
    });

    mock.on_get(
        "/api/v1/namespaces/kube-system/serviceaccounts/hyper-ops-admin",
        200,
        &service_account.to_string(),
    )
    .on_get(
        "/apis/rbac.authorization.k8s.io/v1/clusterrolebindings/hyper-ops-admin",
        200,
        &binding.to_string(),
    )
    .on_get(
        "/api/v1/namespaces/kube-system/secrets/hyper-ops-admin-token",
        200,
        &secret_json(
            "kube-system",
            "hyper-ops-admin-token",
            &[("token", token), ("ca.crt", ca)],
        ),
    )
}
