use std::io::Write;
use std::sync::Mutex;

#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::*;

use crate::config::DeploymentContext;
use crate::prelude::*;
use crate::status_check::Snapshot;

// Receives the difference between two consecutive ticks.  Only one tick is in flight at a time, so
// implementations see check counts in increasing order.
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait ResourceUpdateReporter: Send + Sync {
    fn report_updated_resources(&self, previous: &Snapshot, current: &Snapshot, check_count: u64);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change<'a> {
    Upserted(&'a Resource),
    Removed(&'a Resource),
}

impl<'a> Change<'a> {
    pub fn resource(&self) -> &'a Resource {
        match self {
            Change::Upserted(r) | Change::Removed(r) => r,
        }
    }
}

// Upserts come first (in uid order), then removals
pub fn diff_snapshots<'a>(previous: &'a Snapshot, current: &'a Snapshot) -> Vec<Change<'a>> {
    let upserts = current
        .iter()
        .filter(|(uid, res)| previous.get(*uid).is_none_or(|prev| prev.has_update(res)))
        .map(|(_, res)| Change::Upserted(res));
    let removals = previous
        .iter()
        .filter(|(uid, _)| !current.contains_key(*uid))
        .map(|(_, res)| Change::Removed(res));

    upserts.chain(removals).collect()
}

// The outbound service message; field names are part of the wire contract
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusUpdate {
    pub action_id: String,
    pub task_id: String,
    pub target_id: String,
    pub space_id: String,
    pub uuid: String,
    pub group: String,
    pub version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub status: ResourceStatus,
    pub data: String,
    pub removed: bool,
    pub check_count: u64,
}

impl StatusUpdate {
    pub fn new(context: &DeploymentContext, change: Change, check_count: u64) -> anyhow::Result<StatusUpdate> {
        let resource = change.resource();
        Ok(StatusUpdate {
            action_id: context.action_id.clone(),
            task_id: context.task_id.clone(),
            target_id: context.target_id.clone(),
            space_id: context.space_id.clone(),
            uuid: resource.uid.clone(),
            group: resource.gvk.group.clone(),
            version: resource.gvk.version.clone(),
            kind: resource.gvk.kind.clone(),
            name: resource.name.clone(),
            namespace: resource.namespace.clone(),
            status: resource.status,
            data: serde_json::to_string(&resource.data()?)?,
            removed: matches!(change, Change::Removed(_)),
            check_count,
        })
    }
}

pub trait StatusUpdateSink: Send + Sync {
    fn send(&self, update: &StatusUpdate) -> EmptyResult;
}

// One JSON object per line
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> JsonLinesSink<W> {
        JsonLinesSink { writer: Mutex::new(writer) }
    }
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        JsonLinesSink::new(std::io::stdout())
    }
}

impl<W: Write + Send> StatusUpdateSink for JsonLinesSink<W> {
    fn send(&self, update: &StatusUpdate) -> EmptyResult {
        let line = serde_json::to_string(update)?;
        let mut writer = self.writer.lock().map_err(|e| anyhow::anyhow!("sink lock poisoned: {e}"))?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

pub struct StatusUpdateReporter {
    context: DeploymentContext,
    sink: Box<dyn StatusUpdateSink>,
}

impl StatusUpdateReporter {
    pub fn new(context: DeploymentContext, sink: Box<dyn StatusUpdateSink>) -> StatusUpdateReporter {
        StatusUpdateReporter { context, sink }
    }
}

impl ResourceUpdateReporter for StatusUpdateReporter {
    fn report_updated_resources(&self, previous: &Snapshot, current: &Snapshot, check_count: u64) {
        for change in diff_snapshots(previous, current) {
            let resource = change.resource();
            // cluster-scoped kinds have no namespace, and the receiving end can't handle them
            if resource.namespace.is_empty() {
                continue;
            }

            let res = StatusUpdate::new(&self.context, change, check_count).and_then(|update| self.sink.send(&update));
            if let Err(err) = res {
                warn!("could not send status update for {resource}: {err}");
            }
        }
    }
}
