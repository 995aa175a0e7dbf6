use lazy_static::lazy_static;

use crate::k8s::GVK;

// Terminal log lines; operators and tests grep for these, so don't reword them
pub const STATUS_CHECK_SUCCEEDED_MSG: &str =
    "Resource status check completed successfully because all resources are deployed successfully";
pub const STATUS_CHECK_FAILED_MSG: &str =
    "Resource status check terminated with errors because some resources have failed";
pub const STATUS_CHECK_TIMED_OUT_MSG: &str =
    "Resource status check terminated because the timeout has been reached but some resources are still in progress";
pub const STATUS_CHECK_STOPPED_MSG: &str =
    "Resource status check stopped before completion because it was asked to shut down";

// Defaults
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_KUBECTL: &str = "kubectl";
pub const DEFAULT_CUSTOM_RESOURCE_FILE_NAME: &str = "customresource.yml";
pub const BLUE_GREEN_DEPLOYMENT_STYLE: &str = "bluegreen";
pub const WAIT_DEPLOYMENT_WAIT: &str = "wait";

// Manifest files written out by a deployment step, in the order they get applied
pub const SECRET_MANIFEST_FILE: &str = "secret.yml";
pub const DEPLOYMENT_MANIFEST_FILE: &str = "deployment.yml";
pub const SERVICE_MANIFEST_FILE: &str = "service.yml";
pub const INGRESS_MANIFEST_FILE: &str = "ingress.yml";

// Timing
pub const POLLING_INTERVAL_SECONDS: u64 = 2;

// Kinds
pub const POD_KIND: &str = "Pod";
pub const DEPLOYMENT_KIND: &str = "Deployment";
pub const REPLICASET_KIND: &str = "ReplicaSet";
pub const STATEFULSET_KIND: &str = "StatefulSet";
pub const DAEMONSET_KIND: &str = "DaemonSet";
pub const JOB_KIND: &str = "Job";
pub const CRONJOB_KIND: &str = "CronJob";
pub const SERVICE_KIND: &str = "Service";
pub const ENDPOINTSLICE_KIND: &str = "EndpointSlice";
pub const INGRESS_KIND: &str = "Ingress";
pub const CONFIGMAP_KIND: &str = "ConfigMap";
pub const SECRET_KIND: &str = "Secret";
pub const PVC_KIND: &str = "PersistentVolumeClaim";

// Built-in GVKs
lazy_static! {
    pub static ref POD_GVK: GVK = GVK::new("", "v1", POD_KIND);
    pub static ref DEPLOYMENT_GVK: GVK = GVK::new("apps", "v1", DEPLOYMENT_KIND);
    pub static ref REPLICASET_GVK: GVK = GVK::new("apps", "v1", REPLICASET_KIND);
    pub static ref STATEFULSET_GVK: GVK = GVK::new("apps", "v1", STATEFULSET_KIND);
    pub static ref DAEMONSET_GVK: GVK = GVK::new("apps", "v1", DAEMONSET_KIND);
    pub static ref JOB_GVK: GVK = GVK::new("batch", "v1", JOB_KIND);
    pub static ref CRONJOB_GVK: GVK = GVK::new("batch", "v1", CRONJOB_KIND);
    pub static ref SERVICE_GVK: GVK = GVK::new("", "v1", SERVICE_KIND);
    pub static ref ENDPOINTSLICE_GVK: GVK = GVK::new("discovery.k8s.io", "v1", ENDPOINTSLICE_KIND);
    pub static ref INGRESS_GVK: GVK = GVK::new("networking.k8s.io", "v1", INGRESS_KIND);
    pub static ref CONFIGMAP_GVK: GVK = GVK::new("", "v1", CONFIGMAP_KIND);
    pub static ref SECRET_GVK: GVK = GVK::new("", "v1", SECRET_KIND);
    pub static ref PVC_GVK: GVK = GVK::new("", "v1", PVC_KIND);
}
