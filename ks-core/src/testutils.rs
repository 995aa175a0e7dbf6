use std::collections::VecDeque;
use std::sync::{
    Arc,
    Mutex,
};

use async_trait::async_trait;

use crate::prelude::*;
use crate::reporter::{
    Change,
    ResourceUpdateReporter,
    StatusUpdate,
    StatusUpdateSink,
    diff_snapshots,
};
use crate::resources::ResourceDetails;
use crate::retriever::{
    ResourceRetriever,
    RetrieverError,
};
use crate::status_check::Snapshot;

pub const TESTUTILS_NAMESPACE: &str = "test-namespace";

pub fn test_id(gvk: &GVK, name: &str) -> ResourceIdentifier {
    ResourceIdentifier::new(gvk.clone(), name, Some(TESTUTILS_NAMESPACE))
}

// A bare resource node with no kind-specific details; enough for anything that only looks at
// status and ownership.
pub fn test_resource(gvk: &GVK, name: &str, uid: &str, status: ResourceStatus) -> Resource {
    Resource {
        uid: uid.into(),
        gvk: gvk.clone(),
        name: name.into(),
        namespace: TESTUTILS_NAMESPACE.into(),
        owner_uids: vec![],
        status,
        details: ResourceDetails::Generic {},
        children: vec![],
    }
}

pub fn with_children(mut parent: Resource, children: Vec<Resource>) -> Resource {
    parent.children = children
        .into_iter()
        .map(|mut child| {
            child.owner_uids = vec![parent.uid.clone()];
            child
        })
        .collect();
    parent
}

// Deployment -> ReplicaSet -> Pod, with one status for every node
pub fn deployment_tree(name: &str, status: ResourceStatus) -> Resource {
    deployment_tree_with_pod(name, status, status)
}

pub fn deployment_tree_with_pod(name: &str, status: ResourceStatus, pod_status: ResourceStatus) -> Resource {
    let pod = test_resource(&POD_GVK, &format!("{name}-rs-pod"), &format!("{name}-pod-uid"), pod_status);
    let rs = test_resource(&REPLICASET_GVK, &format!("{name}-rs"), &format!("{name}-rs-uid"), status);
    let deployment = test_resource(&DEPLOYMENT_GVK, name, &format!("{name}-uid"), status);
    with_children(deployment, vec![with_children(rs, vec![pod])])
}

// One scripted tick: the root for each requested id, or None if it "doesn't exist yet"
pub type ScriptedTick = Vec<Option<Resource>>;

// Plays back a fixed sequence of ticks, then keeps repeating the last one
pub struct ScriptedRetriever {
    ticks: Mutex<VecDeque<ScriptedTick>>,
    last: Mutex<Option<ScriptedTick>>,
    calls: Arc<Mutex<Vec<Vec<ResourceIdentifier>>>>,
}

impl ScriptedRetriever {
    pub fn new(ticks: Vec<ScriptedTick>) -> ScriptedRetriever {
        ScriptedRetriever {
            ticks: Mutex::new(ticks.into()),
            last: Mutex::new(None),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Vec<ResourceIdentifier>>>> {
        self.calls.clone()
    }

    fn next_tick(&self) -> ScriptedTick {
        let mut last = self.last.lock().unwrap();
        if let Some(tick) = self.ticks.lock().unwrap().pop_front() {
            *last = Some(tick);
        }
        last.clone().unwrap_or_default()
    }
}

#[async_trait]
impl ResourceRetriever for ScriptedRetriever {
    async fn get_all_resources(&self, ids: &[ResourceIdentifier], _: &Options) -> Vec<anyhow::Result<Resource>> {
        self.calls.lock().unwrap().push(ids.to_vec());
        let mut tick = self.next_tick().into_iter();
        ids.iter()
            .map(|id| match tick.next().flatten() {
                Some(resource) => Ok(resource),
                None => Err(RetrieverError::not_found(&id.to_string())),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportedTick {
    pub check_count: u64,
    pub upserted: Vec<String>,
    pub removed: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub ticks: Arc<Mutex<Vec<ReportedTick>>>,
}

impl RecordingReporter {
    pub fn recorded(&self) -> Vec<ReportedTick> {
        self.ticks.lock().unwrap().clone()
    }
}

impl ResourceUpdateReporter for RecordingReporter {
    fn report_updated_resources(&self, previous: &Snapshot, current: &Snapshot, check_count: u64) {
        let mut tick = ReportedTick { check_count, upserted: vec![], removed: vec![] };
        for change in diff_snapshots(previous, current) {
            match change {
                Change::Upserted(r) => tick.upserted.push(r.uid.clone()),
                Change::Removed(r) => tick.removed.push(r.uid.clone()),
            }
        }
        self.ticks.lock().unwrap().push(tick);
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub updates: Arc<Mutex<Vec<StatusUpdate>>>,
}

impl RecordingSink {
    pub fn recorded(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl StatusUpdateSink for RecordingSink {
    fn send(&self, update: &StatusUpdate) -> EmptyResult {
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}
