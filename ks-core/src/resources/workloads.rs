use super::*;

// The apiserver defaults `spec.replicas` to 1 when it's left off
const DEFAULT_REPLICAS: i32 = 1;
const PROGRESS_DEADLINE_EXCEEDED_REASON: &str = "ProgressDeadlineExceeded";

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDetails {
    pub desired: i32,
    pub total: i32,
    pub updated: i32,
    pub available: i32,
    pub ready: i32,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetDetails {
    pub desired: i32,
    pub current: i32,
    pub ready: i32,
    pub available: i32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetDetails {
    pub desired: i32,
    pub ready: i32,
    pub updated: i32,
    pub current_revision: Option<String>,
    pub update_revision: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetDetails {
    pub desired: i32,
    pub current: i32,
    pub ready: i32,
    pub up_to_date: i32,
    pub available: i32,
}

fn ready_when(ready: bool) -> ResourceStatus {
    if ready { ResourceStatus::Successful } else { ResourceStatus::InProgress }
}

impl ResourceStatusExt for appsv1::Deployment {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let desired = self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(DEFAULT_REPLICAS);
        let status = self.status.as_ref();

        let details = DeploymentDetails {
            desired,
            total: status.and_then(|s| s.replicas).unwrap_or(0),
            updated: status.and_then(|s| s.updated_replicas).unwrap_or(0),
            available: status.and_then(|s| s.available_replicas).unwrap_or(0),
            ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
            message: None,
        };

        let stalled = status
            .and_then(|s| s.conditions.as_ref())
            .into_iter()
            .flatten()
            .find(|c| c.type_ == "Progressing" && c.reason.as_deref() == Some(PROGRESS_DEADLINE_EXCEEDED_REASON));
        if let Some(condition) = stalled {
            let details = DeploymentDetails { message: condition.message.clone(), ..details };
            return (ResourceStatus::Failed, ResourceDetails::Deployment(details));
        }

        // All of the counts have to agree; `total` exceeds `desired` while old replicas drain
        let rolled_out = [details.total, details.updated, details.available, details.ready]
            .iter()
            .all(|n| *n == desired);
        (ready_when(rolled_out), ResourceDetails::Deployment(details))
    }
}

impl ResourceStatusExt for appsv1::ReplicaSet {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let desired = self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(DEFAULT_REPLICAS);
        let status = self.status.as_ref();

        let details = ReplicaSetDetails {
            desired,
            current: status.map(|s| s.replicas).unwrap_or(0),
            ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
            available: status.and_then(|s| s.available_replicas).unwrap_or(0),
        };

        let ready = details.ready == desired && details.available == desired;
        (ready_when(ready), ResourceDetails::ReplicaSet(details))
    }
}

impl ResourceStatusExt for appsv1::StatefulSet {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let desired = self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(DEFAULT_REPLICAS);
        let status = self.status.as_ref();

        let details = StatefulSetDetails {
            desired,
            ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
            updated: status.and_then(|s| s.updated_replicas).unwrap_or(0),
            current_revision: status.and_then(|s| s.current_revision.clone()),
            update_revision: status.and_then(|s| s.update_revision.clone()),
        };

        let ready = details.ready == desired
            && details.updated == desired
            && details.current_revision == details.update_revision;
        (ready_when(ready), ResourceDetails::StatefulSet(details))
    }
}

impl ResourceStatusExt for appsv1::DaemonSet {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let details = match self.status.as_ref() {
            Some(s) => DaemonSetDetails {
                desired: s.desired_number_scheduled,
                current: s.current_number_scheduled,
                ready: s.number_ready,
                up_to_date: s.updated_number_scheduled.unwrap_or(0),
                available: s.number_available.unwrap_or(0),
            },
            None => DaemonSetDetails::default(),
        };

        // A DaemonSet with no status yet hasn't been picked up by the controller
        let ready = self.status.is_some()
            && details.ready == details.desired
            && details.up_to_date == details.desired
            && details.available == details.desired;
        (ready_when(ready), ResourceDetails::DaemonSet(details))
    }
}
