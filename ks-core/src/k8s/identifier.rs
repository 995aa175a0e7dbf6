use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

lazy_static! {
    // Kinds that never live in a namespace; a namespace on one of these in a manifest is ignored
    static ref CLUSTER_SCOPED_KINDS: HashSet<&'static str> = HashSet::from([
        "APIService",
        "CertificateSigningRequest",
        "ClusterIssuer",
        "ClusterRole",
        "ClusterRoleBinding",
        "ComponentStatus",
        "CSIDriver",
        "CSINode",
        "CustomResourceDefinition",
        "FlowSchema",
        "IngressClass",
        "MutatingWebhookConfiguration",
        "Namespace",
        "Node",
        "PersistentVolume",
        "PriorityClass",
        "PriorityLevelConfiguration",
        "RuntimeClass",
        "StorageClass",
        "ValidatingAdmissionPolicy",
        "ValidatingAdmissionPolicyBinding",
        "ValidatingWebhookConfiguration",
        "VolumeAttachment",
    ]);
}

pub fn is_cluster_scoped(kind: &str) -> bool {
    CLUSTER_SCOPED_KINDS.contains(kind)
}

// A ResourceIdentifier names an object that a deployment asked to create; equality is by value
// over all three fields.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ResourceIdentifier {
    pub gvk: GVK,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceIdentifier {
    pub fn new(gvk: GVK, name: &str, namespace: Option<&str>) -> ResourceIdentifier {
        let namespace = if is_cluster_scoped(&gvk.kind) {
            None
        } else {
            namespace.filter(|ns| !ns.is_empty()).map(String::from)
        };
        ResourceIdentifier { gvk, name: name.into(), namespace }
    }

    // Resolve a (possibly missing) manifest namespace against the step's default namespace
    pub fn with_default_namespace(
        gvk: GVK,
        name: &str,
        namespace: Option<&str>,
        default_namespace: &str,
    ) -> ResourceIdentifier {
        let namespace = namespace.filter(|ns| !ns.is_empty()).unwrap_or(default_namespace);
        ResourceIdentifier::new(gvk, name, Some(namespace))
    }

    pub fn namespace_or_empty(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {ns}/{}", self.gvk, self.name),
            None => write!(f, "{} {}", self.gvk, self.name),
        }
    }
}
