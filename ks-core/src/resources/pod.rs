use super::*;
use crate::k8s::{
    COMPLETED_REASON,
    ContainerActivity,
    ContainerStateExt,
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodDetails {
    pub status: String,
    pub ready: String,
    pub restarts: i32,
}

fn activities(statuses: Option<&Vec<corev1::ContainerStatus>>) -> Vec<ContainerActivity> {
    statuses
        .into_iter()
        .flatten()
        .filter_map(|cs| cs.state.as_ref())
        .filter_map(|state| match state.activity() {
            Ok(activity) => Some(activity),
            Err(err) => {
                warn!("{err}");
                None
            },
        })
        .collect()
}

// Mirrors the STATUS column of `kubectl get pods`: init containers first, then the first
// container that isn't running, then the pod phase.
fn display_status(pod_status: &corev1::PodStatus) -> (String, ResourceStatus) {
    let init = activities(pod_status.init_container_statuses.as_ref());
    if let Some(failed) = init.iter().find(|a| a.is_failure()) {
        let reason = failed.reason().unwrap_or_default();
        return (format!("Init:{reason}"), ResourceStatus::Failed);
    }
    let init_done = init.iter().filter(|a| a.is_completed()).count();
    if init_done < init.len() {
        return (format!("Init:{init_done}/{}", init.len()), ResourceStatus::InProgress);
    }

    let containers = activities(pod_status.container_statuses.as_ref());
    if let Some(failed) = containers.iter().find(|a| a.is_failure()) {
        return (failed.reason().unwrap_or_default().into(), ResourceStatus::Failed);
    }
    if let Some(ContainerActivity::Waiting(reason)) =
        containers.iter().find(|a| matches!(a, ContainerActivity::Waiting(_)))
    {
        return (reason.clone(), ResourceStatus::InProgress);
    }
    if !containers.is_empty() && containers.iter().all(|a| a.is_completed()) {
        return (COMPLETED_REASON.into(), ResourceStatus::Successful);
    }

    let phase = pod_status.phase.clone().unwrap_or_else(|| "Unknown".into());
    let status = match phase.as_str() {
        "Running" => ResourceStatus::Successful,
        "Succeeded" => return (COMPLETED_REASON.into(), ResourceStatus::Successful),
        "Failed" => ResourceStatus::Failed,
        _ => ResourceStatus::InProgress,
    };
    (phase, status)
}

impl ResourceStatusExt for corev1::Pod {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let Some(pod_status) = self.status.as_ref() else {
            let details = PodDetails { status: "Pending".into(), ready: "0/0".into(), restarts: 0 };
            return (ResourceStatus::InProgress, ResourceDetails::Pod(details));
        };

        let (status_text, status) = display_status(pod_status);
        let containers = pod_status.container_statuses.as_deref().unwrap_or_default();
        let ready = containers.iter().filter(|cs| cs.ready).count();
        let restarts = containers.iter().map(|cs| cs.restart_count).sum();

        let details = PodDetails {
            status: status_text,
            ready: format!("{ready}/{}", containers.len()),
            restarts,
        };
        (status, ResourceDetails::Pod(details))
    }
}
