mod running;
mod task;
mod timer;

use std::collections::BTreeMap;
use std::fmt;

pub use running::*;
use serde::{
    Deserialize,
    Serialize,
};
pub use task::*;
pub use timer::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {StatusCheckError,
    #[error("status check task did not finish cleanly: {0}")]
    TaskFailed(String),

    #[error("status check has already completed: {0}")]
    AlreadyCompleted(String),
}

// Every node from one tick's trees, keyed by uid; ordered so that reporting is deterministic
pub type Snapshot = BTreeMap<String, Resource>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DeploymentStatus {
    InProgress,
    Succeeded,
    Failed,
}

impl DeploymentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DeploymentStatus::InProgress)
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// Roll up one tick's trees against what the deployment asked for.  A failure anywhere in a tree
// fails the deployment; success needs every node to be successful and every defined root to
// actually exist.
pub fn aggregate(roots: &[Resource], defined: &[ResourceIdentifier]) -> DeploymentStatus {
    if defined.is_empty() {
        return DeploymentStatus::Succeeded;
    }

    let mut nodes = roots.iter().flat_map(|root| root.flatten());
    if nodes.clone().any(|r| r.status == ResourceStatus::Failed) {
        DeploymentStatus::Failed
    } else if nodes.all(|r| r.status == ResourceStatus::Successful) && roots.len() == defined.len() {
        DeploymentStatus::Succeeded
    } else {
        DeploymentStatus::InProgress
    }
}

pub fn snapshot_of(roots: &[Resource]) -> Snapshot {
    roots
        .iter()
        .flat_map(|root| root.flatten())
        .map(|r| (r.uid.clone(), Resource { children: vec![], ..r.clone() }))
        .collect()
}

// The most recent tick's view of the world
#[derive(Clone, Debug, PartialEq)]
pub struct StatusCheckResult {
    pub defined_resources: Vec<ResourceIdentifier>,
    pub defined_resource_statuses: Vec<Resource>,
    pub resource_statuses: Snapshot,
    pub deployment_status: DeploymentStatus,
    pub check_count: u64,
}

impl Default for StatusCheckResult {
    fn default() -> Self {
        StatusCheckResult {
            defined_resources: vec![],
            defined_resource_statuses: vec![],
            resource_statuses: Snapshot::new(),
            deployment_status: DeploymentStatus::InProgress,
            check_count: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    // reached a terminal status and held it through the stabilization window
    Completed,
    TimedOut,
    // stopped so the watched set could be changed
    Cancelled,
    // the caller asked us to wrap up after one last tick
    Drained,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskOutcome {
    pub result: StatusCheckResult,
    pub stop_reason: StopReason,
}

#[cfg(test)]
mod tests;
