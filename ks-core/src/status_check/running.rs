use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::*;

use super::*;

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait RunningStatusCheck: Send + Sync {
    async fn add_resources(&self, ids: Vec<ResourceIdentifier>) -> EmptyResult;

    // Returns whether the deployment should be considered successful.  Cancelling `shutdown`
    // asks the check to stop after one more tick, which counts as a graceful (successful) stop.
    async fn wait_for_completion_or_timeout(&self, shutdown: CancellationToken) -> anyhow::Result<bool>;
}

struct RunState {
    resources: Vec<ResourceIdentifier>,
    cancel: CancellationToken,
    drain: CancellationToken,
    handle: Option<JoinHandle<TaskOutcome>>,
    last: StatusCheckResult,
}

// Owns the single in-flight poll for one deployment step.  Everything goes through `state`, and
// the lock is held across the awaits, so restarts and the final wait can never overlap.
pub struct RunningResourceStatusCheck {
    task: Arc<ResourceStatusCheckTask>,
    options: Options,
    deployment_timeout: Option<Duration>,
    stabilization_timeout: Duration,
    state: Mutex<RunState>,
}

impl RunningResourceStatusCheck {
    // Must be called from inside a tokio runtime; the first poll starts right away
    pub fn start(
        task: Arc<ResourceStatusCheckTask>,
        options: Options,
        deployment_timeout: Option<Duration>,
        stabilization_timeout: Duration,
        initial_resources: Vec<ResourceIdentifier>,
    ) -> RunningResourceStatusCheck {
        let mut resources = vec![];
        extend_unique(&mut resources, initial_resources);
        info!("starting resource status check on {} resources", resources.len());

        let mut state = RunState { resources, ..Default::default() };
        let check = RunningResourceStatusCheck {
            task,
            options,
            deployment_timeout,
            stabilization_timeout,
            state: Mutex::new(RunState::default()),
        };
        check.spawn(&mut state);

        RunningResourceStatusCheck { state: Mutex::new(state), ..check }
    }

    pub async fn watched_resources(&self) -> Vec<ResourceIdentifier> {
        self.state.lock().await.resources.clone()
    }

    pub async fn last_result(&self) -> StatusCheckResult {
        self.state.lock().await.last.clone()
    }

    fn spawn(&self, state: &mut RunState) {
        state.cancel = CancellationToken::new();
        state.drain = CancellationToken::new();

        let task = self.task.clone();
        let resources = state.resources.clone();
        let options = self.options;
        let timer = Timer::with_default_interval(self.deployment_timeout, self.stabilization_timeout);
        let seed = state.last.clone();
        let (cancel, drain) = (state.cancel.clone(), state.drain.clone());

        state.handle = Some(tokio::spawn(async move { task.run(resources, options, timer, seed, cancel, drain).await }));
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState {
            resources: vec![],
            cancel: CancellationToken::new(),
            drain: CancellationToken::new(),
            handle: None,
            last: StatusCheckResult::default(),
        }
    }
}

fn extend_unique(resources: &mut Vec<ResourceIdentifier>, ids: Vec<ResourceIdentifier>) -> usize {
    let before = resources.len();
    for id in ids {
        if !resources.contains(&id) {
            resources.push(id);
        }
    }
    resources.len() - before
}

async fn join(handle: JoinHandle<TaskOutcome>) -> anyhow::Result<TaskOutcome> {
    handle.await.map_err(|err| StatusCheckError::task_failed(&err.to_string()))
}

// Cluster-scoped kinds we don't know about still carry the default namespace on the identifier,
// but come back from the cluster with none
pub(crate) fn is_observed_as(id: &ResourceIdentifier, resource: &Resource) -> bool {
    resource.gvk == id.gvk
        && resource.name == id.name
        && (resource.namespace.is_empty() || resource.namespace == id.namespace_or_empty())
}

fn log_final_state(outcome: &TaskOutcome) -> bool {
    let result = &outcome.result;
    match (result.deployment_status, outcome.stop_reason) {
        (DeploymentStatus::Succeeded, _) => {
            info!("{STATUS_CHECK_SUCCEEDED_MSG}");
            true
        },
        (DeploymentStatus::Failed, _) => {
            debug!("the following resources have failed:");
            for resource in result.resource_statuses.values().filter(|r| r.status == ResourceStatus::Failed) {
                debug!(" - {resource}");
            }
            error!("{STATUS_CHECK_FAILED_MSG}");
            false
        },
        (DeploymentStatus::InProgress, StopReason::Drained | StopReason::Cancelled) => {
            info!("{STATUS_CHECK_STOPPED_MSG}");
            true
        },
        (DeploymentStatus::InProgress, _) => {
            debug!("the following resources are still in progress by the end of the timeout:");
            for resource in result.resource_statuses.values().filter(|r| r.status == ResourceStatus::InProgress) {
                debug!(" - {resource}");
            }
            for id in &result.defined_resources {
                if !result.defined_resource_statuses.iter().any(|r| is_observed_as(id, r)) {
                    debug!("{id} was not created by the end of the timeout");
                }
            }
            error!("{STATUS_CHECK_TIMED_OUT_MSG}");
            false
        },
    }
}

#[async_trait]
impl RunningStatusCheck for RunningResourceStatusCheck {
    // Cancel the current poll, wait for it to let go, then start over on the bigger set.  A poll
    // that already finished is simply restarted, so resources applied after the deployment settled
    // still get watched.
    async fn add_resources(&self, ids: Vec<ResourceIdentifier>) -> EmptyResult {
        let mut state = self.state.lock().await;
        let Some(handle) = state.handle.take() else {
            return Err(StatusCheckError::already_completed("cannot add resources"));
        };

        state.cancel.cancel();
        state.last = join(handle).await?.result;

        let added = extend_unique(&mut state.resources, ids);
        info!("resource status check: {added} new resources have been added");
        self.spawn(&mut state);
        Ok(())
    }

    async fn wait_for_completion_or_timeout(&self, shutdown: CancellationToken) -> anyhow::Result<bool> {
        let mut state = self.state.lock().await;
        let Some(mut handle) = state.handle.take() else {
            return Err(StatusCheckError::already_completed("the result was already collected"));
        };

        let drain = state.drain.clone();
        let res = tokio::select! {
            res = &mut handle => res,
            _ = shutdown.cancelled() => {
                info!("shutdown requested, stopping the resource status check after one more check");
                drain.cancel();
                handle.await
            },
        };

        let outcome = res.map_err(|err| StatusCheckError::task_failed(&err.to_string()))?;
        state.last = outcome.result.clone();
        Ok(log_final_state(&outcome))
    }
}
