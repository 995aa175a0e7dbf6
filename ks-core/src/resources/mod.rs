mod batch;
mod kind;
mod network;
mod pod;
mod storage;
mod workloads;

use std::fmt;

pub use batch::*;
pub use kind::*;
pub use network::*;
pub use pod::*;
use serde::de::DeserializeOwned;
use serde::{
    Deserialize,
    Serialize,
};
pub use storage::*;
use tracing::*;
pub use workloads::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {ResourceError,
    #[error("object is missing required field: {0}")]
    MissingField(String),

    #[error("could not parse {0}")]
    Unparseable(String),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ResourceStatus {
    InProgress,
    Successful,
    Failed,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// The kind-specific fields we surface for each resource; this is what gets serialized into the
// `Data` field of a status notification.  Secret and ConfigMap contents are never included.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceDetails {
    Pod(PodDetails),
    Deployment(DeploymentDetails),
    ReplicaSet(ReplicaSetDetails),
    StatefulSet(StatefulSetDetails),
    DaemonSet(DaemonSetDetails),
    Job(JobDetails),
    CronJob(CronJobDetails),
    Service(ServiceDetails),
    EndpointSlice(EndpointSliceDetails),
    Ingress(IngressDetails),
    ConfigMap(ConfigMapDetails),
    Secret(SecretDetails),
    PersistentVolumeClaim(PersistentVolumeClaimDetails),
    Generic {},
}

// Kind-specific readiness policy: each supported API type knows how to turn itself into a
// status and a details record.
pub trait ResourceStatusExt {
    fn status_and_details(&self, options: &Options) -> (ResourceStatus, ResourceDetails);
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectHeader {
    api_version: String,
    kind: String,
    #[serde(default)]
    metadata: metav1::ObjectMeta,
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

// A Resource is a snapshot of one live object as of the current tick, plus the objects it owns.
// They are rebuilt from kubectl output on every poll and never updated in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resource {
    pub uid: String,
    pub gvk: GVK,
    pub name: String,
    pub namespace: String,
    pub owner_uids: Vec<String>,
    pub status: ResourceStatus,
    pub details: ResourceDetails,
    pub children: Vec<Resource>,
}

fn evaluate<T>(value: serde_json::Value, options: &Options) -> anyhow::Result<(ResourceStatus, ResourceDetails)>
where
    T: DeserializeOwned + ResourceStatusExt,
{
    let obj: T = serde_json::from_value(value)?;
    Ok(obj.status_and_details(options))
}

impl Resource {
    pub fn from_json(json: &str, options: &Options) -> anyhow::Result<Resource> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Resource::from_value(value, options)
    }

    // Parses the output of `kubectl get <kind> -o json`; items that can't be understood are logged
    // and dropped rather than failing the whole list.
    pub fn list_from_json(json: &str, options: &Options) -> anyhow::Result<Vec<Resource>> {
        let list: ObjectList = serde_json::from_str(json)?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|item| match Resource::from_value(item, options) {
                Ok(resource) => Some(resource),
                Err(err) => {
                    warn!("skipping list item: {err}");
                    None
                },
            })
            .collect())
    }

    pub fn from_value(value: serde_json::Value, options: &Options) -> anyhow::Result<Resource> {
        let header: ObjectHeader = serde_json::from_value(value.clone())?;
        let gvk = GVK::from_api_version(&header.api_version, &header.kind)?;
        let uid = header.metadata.uid.clone().ok_or(ResourceError::missing_field("metadata.uid"))?;
        let name = header.metadata.name.clone().ok_or(ResourceError::missing_field("metadata.name"))?;
        let namespace = header.metadata.namespace.clone().unwrap_or_default();
        let owner_uids = header
            .metadata
            .owner_references
            .iter()
            .flatten()
            .map(|rf| rf.uid.clone())
            .collect();

        let (status, details) = match SupportedKind::from_gvk(&gvk) {
            Some(kind) => kind.evaluate(value, options).map_err(|err| {
                debug!("{err}");
                ResourceError::unparseable(&format!("{gvk} {name}"))
            })?,
            None => (ResourceStatus::Successful, ResourceDetails::Generic {}),
        };

        Ok(Resource {
            uid,
            gvk,
            name,
            namespace,
            owner_uids,
            status,
            details,
            children: vec![],
        })
    }

    pub fn supported_kind(&self) -> Option<SupportedKind> {
        SupportedKind::from_gvk(&self.gvk)
    }

    pub fn is_owned_by(&self, owner: &Resource) -> bool {
        self.owner_uids.iter().any(|uid| *uid == owner.uid)
    }

    // Everything we report about a resource lives in its status and details, so those are the only
    // things that count as a change.  Children are compared separately as their own entries.
    pub fn has_update(&self, other: &Resource) -> bool {
        self.status != other.status
            || self.details != other.details
            || self.name != other.name
            || self.namespace != other.namespace
            || self.gvk != other.gvk
    }

    pub fn data(&self) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.details)?)
    }

    // Every node in the tree exactly once, children before their parent
    pub fn flatten(&self) -> Vec<&Resource> {
        let mut out = vec![];
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Resource>) {
        for child in &self.children {
            child.flatten_into(out);
        }
        out.push(self);
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{} {} ({})", self.gvk, self.name, self.status)
        } else {
            write!(f, "{} {}/{} ({})", self.gvk, self.namespace, self.name, self.status)
        }
    }
}

#[cfg(test)]
mod tests;
