// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update with retries on optimistic concurrency conflicts

use crate::error::{HyperOpsError, Result};
use kube::{api::PostParams, Api, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// What a create-or-update ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    Created,
    Updated,
    Unchanged,
}

/// Bounded exponential backoff between conflicting attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryBackoff {
    /// Total number of attempts, including the first one
    pub steps: u32,
    pub initial: Duration,
    pub factor: u32,
}

impl Default for RetryBackoff {
    fn default() -> Self {
        Self {
            steps: 4,
            initial: Duration::from_millis(10),
            factor: 5,
        }
    }
}

impl RetryBackoff {
    /// Delay before the given retry (1 based)
    pub fn delay(&self, retry: u32) -> Duration {
        self.initial * self.factor.saturating_pow(retry.saturating_sub(1))
    }
}

pub fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == 409 && e.reason == "Conflict")
}

pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == 404)
}

/// Create `desired` if absent, otherwise apply `mutate` to the live object and write it back.
/// Only conflicts are retried; everything else is returned straight away.
pub async fn create_or_update_with_retries<K, F>(
    api: &Api<K>,
    desired: &K,
    backoff: &RetryBackoff,
    mutate: F,
) -> Result<OperationResult>
where
    K: Resource + Clone + Debug + PartialEq + Serialize + DeserializeOwned,
    K::DynamicType: Default,
    F: Fn(&mut K),
{
    let kind = K::kind(&K::DynamicType::default()).to_string();
    let name = desired.name_any();
    let mut attempt = 1;

    loop {
        match create_or_update(api, desired, &mutate).await {
            Ok(op) => {
                debug!("{} {} reconciled: {:?}", kind, name, op);
                return Ok(op);
            }
            Err(e) if is_conflict(&e) => {
                if attempt >= backoff.steps {
                    return Err(HyperOpsError::ConflictRetriesExhausted {
                        kind,
                        name,
                        attempts: attempt,
                    });
                }
                let delay = backoff.delay(attempt);
                debug!(
                    "Conflict writing {} {}, retrying in {:?} (attempt {}/{})",
                    kind, name, delay, attempt, backoff.steps
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn create_or_update<K, F>(api: &Api<K>, desired: &K, mutate: &F) -> kube::Result<OperationResult>
where
    K: Resource + Clone + Debug + PartialEq + Serialize + DeserializeOwned,
    F: Fn(&mut K),
{
    let name = desired.name_any();

    let Some(existing) = api.get_opt(&name).await? else {
        let mut object = desired.clone();
        mutate(&mut object);
        api.create(&PostParams::default(), &object).await?;
        info!("Created {}", name);
        return Ok(OperationResult::Created);
    };

    let mut object = existing.clone();
    mutate(&mut object);
    if object == existing {
        return Ok(OperationResult::Unchanged);
    }

    api.replace(&name, &PostParams::default(), &object).await?;
    info!("Updated {}", name);
    Ok(OperationResult::Updated)
}
