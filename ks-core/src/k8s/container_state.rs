use super::*;

pub const CONTAINER_CREATING_REASON: &str = "ContainerCreating";
pub const POD_INITIALIZING_REASON: &str = "PodInitializing";
pub const COMPLETED_REASON: &str = "Completed";

// What a single container is doing, with kubectl's display reason filled in
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContainerActivity {
    Running,
    Waiting(String),
    Terminated(String),
}

impl ContainerActivity {
    pub fn reason(&self) -> Option<&str> {
        match self {
            ContainerActivity::Running => None,
            ContainerActivity::Waiting(r) | ContainerActivity::Terminated(r) => Some(r),
        }
    }

    // A waiting container is only healthy while kubelet is still setting it up; a terminated one is
    // only healthy if it exited cleanly.
    pub fn is_failure(&self) -> bool {
        match self {
            ContainerActivity::Running => false,
            ContainerActivity::Waiting(r) => r != CONTAINER_CREATING_REASON && r != POD_INITIALIZING_REASON,
            ContainerActivity::Terminated(r) => r != COMPLETED_REASON,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ContainerActivity::Terminated(r) if r == COMPLETED_REASON)
    }
}

pub trait ContainerStateExt {
    fn activity(&self) -> anyhow::Result<ContainerActivity>;
}

// As per the Kubernetes spec, it is an error for the ContainerState to have more than one of
// `running`, `terminated`, or `waiting` set, so anything else is reported as malformed.
impl ContainerStateExt for corev1::ContainerState {
    fn activity(&self) -> anyhow::Result<ContainerActivity> {
        match self {
            corev1::ContainerState { running: Some(_), terminated: None, waiting: None } => Ok(ContainerActivity::Running),
            corev1::ContainerState { running: None, terminated: Some(t), waiting: None } => {
                let reason = match t.reason.as_deref() {
                    Some(r) if !r.is_empty() => r.to_string(),
                    _ if t.exit_code == 0 => COMPLETED_REASON.to_string(),
                    _ => format!("ExitCode:{}", t.exit_code),
                };
                Ok(ContainerActivity::Terminated(reason))
            },
            corev1::ContainerState { running: None, terminated: None, waiting: Some(w) } => {
                let reason = w.reason.as_deref().filter(|r| !r.is_empty()).unwrap_or(CONTAINER_CREATING_REASON);
                Ok(ContainerActivity::Waiting(reason.into()))
            },
            _ => Err(KubernetesError::malformed_container_state(self)),
        }
    }
}
