use super::*;

// The closed set of kinds we have readiness rules for.  Anything else is reported but always
// counts as successful as soon as it exists.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SupportedKind {
    Pod,
    Deployment,
    ReplicaSet,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
    Service,
    EndpointSlice,
    Ingress,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
}

impl SupportedKind {
    pub fn from_gvk(gvk: &GVK) -> Option<SupportedKind> {
        [
            SupportedKind::Pod,
            SupportedKind::Deployment,
            SupportedKind::ReplicaSet,
            SupportedKind::StatefulSet,
            SupportedKind::DaemonSet,
            SupportedKind::Job,
            SupportedKind::CronJob,
            SupportedKind::Service,
            SupportedKind::EndpointSlice,
            SupportedKind::Ingress,
            SupportedKind::ConfigMap,
            SupportedKind::Secret,
            SupportedKind::PersistentVolumeClaim,
        ]
        .into_iter()
        .find(|kind| kind.gvk() == gvk)
    }

    pub fn gvk(&self) -> &'static GVK {
        match self {
            SupportedKind::Pod => &POD_GVK,
            SupportedKind::Deployment => &DEPLOYMENT_GVK,
            SupportedKind::ReplicaSet => &REPLICASET_GVK,
            SupportedKind::StatefulSet => &STATEFULSET_GVK,
            SupportedKind::DaemonSet => &DAEMONSET_GVK,
            SupportedKind::Job => &JOB_GVK,
            SupportedKind::CronJob => &CRONJOB_GVK,
            SupportedKind::Service => &SERVICE_GVK,
            SupportedKind::EndpointSlice => &ENDPOINTSLICE_GVK,
            SupportedKind::Ingress => &INGRESS_GVK,
            SupportedKind::ConfigMap => &CONFIGMAP_GVK,
            SupportedKind::Secret => &SECRET_GVK,
            SupportedKind::PersistentVolumeClaim => &PVC_GVK,
        }
    }

    // The kind of object this kind owns, if any; this is what the retriever walks to build the
    // ownership tree.
    pub fn child(&self) -> Option<SupportedKind> {
        match self {
            SupportedKind::Deployment => Some(SupportedKind::ReplicaSet),
            SupportedKind::ReplicaSet | SupportedKind::StatefulSet | SupportedKind::DaemonSet | SupportedKind::Job => {
                Some(SupportedKind::Pod)
            },
            SupportedKind::CronJob => Some(SupportedKind::Job),
            SupportedKind::Service => Some(SupportedKind::EndpointSlice),
            SupportedKind::Pod
            | SupportedKind::EndpointSlice
            | SupportedKind::Ingress
            | SupportedKind::ConfigMap
            | SupportedKind::Secret
            | SupportedKind::PersistentVolumeClaim => None,
        }
    }

    pub(super) fn evaluate(
        &self,
        value: serde_json::Value,
        options: &Options,
    ) -> anyhow::Result<(ResourceStatus, ResourceDetails)> {
        match self {
            SupportedKind::Pod => evaluate::<corev1::Pod>(value, options),
            SupportedKind::Deployment => evaluate::<appsv1::Deployment>(value, options),
            SupportedKind::ReplicaSet => evaluate::<appsv1::ReplicaSet>(value, options),
            SupportedKind::StatefulSet => evaluate::<appsv1::StatefulSet>(value, options),
            SupportedKind::DaemonSet => evaluate::<appsv1::DaemonSet>(value, options),
            SupportedKind::Job => evaluate::<batchv1::Job>(value, options),
            SupportedKind::CronJob => evaluate::<batchv1::CronJob>(value, options),
            SupportedKind::Service => evaluate::<corev1::Service>(value, options),
            SupportedKind::EndpointSlice => evaluate::<discoveryv1::EndpointSlice>(value, options),
            SupportedKind::Ingress => evaluate::<networkingv1::Ingress>(value, options),
            SupportedKind::ConfigMap => evaluate::<corev1::ConfigMap>(value, options),
            SupportedKind::Secret => evaluate::<corev1::Secret>(value, options),
            SupportedKind::PersistentVolumeClaim => evaluate::<corev1::PersistentVolumeClaim>(value, options),
        }
    }
}
