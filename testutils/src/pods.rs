use rstest::fixture;
use serde_json::{
    Value,
    json,
};

use crate::constants::*;
use crate::objs::metadata;

pub fn running() -> Value {
    json!({"running": {}})
}

pub fn waiting(reason: &str) -> Value {
    json!({"waiting": {"reason": reason}})
}

pub fn terminated(reason: &str, exit_code: i32) -> Value {
    json!({"terminated": {"reason": reason, "exitCode": exit_code}})
}

pub fn container_status(name: &str, state: Value, ready: bool, restarts: i32) -> Value {
    json!({
        "name": name,
        "image": "nginx:1.27",
        "imageID": "docker.io/library/nginx@sha256:0000",
        "ready": ready,
        "restartCount": restarts,
        "state": state,
    })
}

pub fn container_statuses(states: Vec<Value>) -> Vec<Value> {
    states
        .into_iter()
        .enumerate()
        .map(|(i, state)| {
            let ready = state.get("running").is_some();
            container_status(&format!("container-{i}"), state, ready, 0)
        })
        .collect()
}

pub fn pod_json(phase: &str, init_statuses: Vec<Value>, statuses: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": metadata(TEST_POD, TEST_POD_UID, Some(TEST_REPLICASET_UID)),
        "spec": {"containers": [{"name": "container-0", "image": "nginx:1.27"}]},
        "status": {
            "phase": phase,
            "initContainerStatuses": init_statuses,
            "containerStatuses": statuses,
        },
    })
}

#[fixture]
pub fn test_pod(#[default("Running")] phase: &str) -> Value {
    pod_json(phase, vec![], container_statuses(vec![running()]))
}
