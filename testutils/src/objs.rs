use rstest::fixture;
use serde_json::{
    Value,
    json,
};

use crate::constants::*;

pub fn metadata(name: &str, uid: &str, owner_uid: Option<&str>) -> Value {
    let mut meta = json!({
        "name": name,
        "namespace": TEST_NAMESPACE,
        "uid": uid,
    });
    if let Some(owner_uid) = owner_uid {
        meta["ownerReferences"] = json!([{
            "apiVersion": "apps/v1",
            "kind": "Owner",
            "name": "owner",
            "uid": owner_uid,
        }]);
    }
    meta
}

// What `kubectl get <kind> -o json` hands back
pub fn list_json(items: Vec<Value>) -> String {
    json!({
        "apiVersion": "v1",
        "kind": "List",
        "metadata": {"resourceVersion": ""},
        "items": items,
    })
    .to_string()
}

#[fixture]
pub fn test_deployment(#[default(3)] desired: i32, #[default(3)] ready: i32) -> Value {
    let available = if ready == desired { "True" } else { "False" };
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": metadata(TEST_DEPLOYMENT, TEST_DEPLOYMENT_UID, None),
        "spec": {
            "replicas": desired,
            "selector": {"matchLabels": {"app": "web"}},
            "template": {"metadata": {"labels": {"app": "web"}}},
        },
        "status": {
            "replicas": desired,
            "updatedReplicas": ready,
            "availableReplicas": ready,
            "readyReplicas": ready,
            "conditions": [{
                "type": "Available",
                "status": available,
            }],
        },
    })
}

#[fixture]
pub fn test_replicaset(#[default(3)] desired: i32, #[default(3)] ready: i32) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "ReplicaSet",
        "metadata": metadata(TEST_REPLICASET, TEST_REPLICASET_UID, Some(TEST_DEPLOYMENT_UID)),
        "spec": {
            "replicas": desired,
            "selector": {"matchLabels": {"app": "web"}},
        },
        "status": {
            "replicas": desired,
            "readyReplicas": ready,
            "availableReplicas": ready,
        },
    })
}

#[fixture]
pub fn test_statefulset(#[default(2)] ready: i32, #[default("rev-2")] current_revision: &str) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": metadata(TEST_STATEFULSET, "statefulset-uid", None),
        "spec": {
            "replicas": 2,
            "serviceName": TEST_SERVICE,
            "selector": {"matchLabels": {"app": "db"}},
            "template": {"metadata": {"labels": {"app": "db"}}},
        },
        "status": {
            "replicas": 2,
            "readyReplicas": ready,
            "updatedReplicas": ready,
            "currentRevision": current_revision,
            "updateRevision": "rev-2",
        },
    })
}

#[fixture]
pub fn test_daemonset(#[default(4)] ready: i32) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "DaemonSet",
        "metadata": metadata(TEST_DAEMONSET, "daemonset-uid", None),
        "spec": {
            "selector": {"matchLabels": {"app": "agent"}},
            "template": {"metadata": {"labels": {"app": "agent"}}},
        },
        "status": {
            "currentNumberScheduled": 4,
            "desiredNumberScheduled": 4,
            "numberMisscheduled": 0,
            "numberReady": ready,
            "updatedNumberScheduled": ready,
            "numberAvailable": ready,
        },
    })
}

#[fixture]
pub fn test_job(#[default(0)] succeeded: i32, #[default(None)] condition: Option<&str>) -> Value {
    let mut job = json!({
        "apiVersion": "batch/v1",
        "kind": "Job",
        "metadata": metadata(TEST_JOB, TEST_JOB_UID, None),
        "spec": {
            "completions": 1,
            "template": {"spec": {"containers": [{"name": "main", "image": "busybox"}]}},
        },
        "status": {
            "active": 1 - succeeded,
            "succeeded": succeeded,
        },
    });
    if let Some(condition) = condition {
        job["status"]["conditions"] = json!([{"type": condition, "status": "True"}]);
    }
    job
}

#[fixture]
pub fn test_cronjob() -> Value {
    json!({
        "apiVersion": "batch/v1",
        "kind": "CronJob",
        "metadata": metadata(TEST_CRONJOB, TEST_CRONJOB_UID, None),
        "spec": {
            "schedule": "*/5 * * * *",
            "jobTemplate": {"spec": {"template": {}}},
        },
        "status": {},
    })
}

#[fixture]
pub fn test_service() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": metadata(TEST_SERVICE, TEST_SERVICE_UID, None),
        "spec": {
            "type": "NodePort",
            "clusterIP": "10.96.0.12",
            "ports": [{"port": 80, "nodePort": 30080, "protocol": "TCP"}],
        },
        "status": {"loadBalancer": {}},
    })
}

#[fixture]
pub fn test_endpointslice() -> Value {
    json!({
        "apiVersion": "discovery.k8s.io/v1",
        "kind": "EndpointSlice",
        "metadata": metadata("the-service-abcde", "endpointslice-uid", Some(TEST_SERVICE_UID)),
        "addressType": "IPv4",
        "endpoints": [{"addresses": ["10.244.0.7"]}, {"addresses": ["10.244.0.8"]}],
        "ports": [{"port": 8080, "protocol": "TCP"}],
    })
}

#[fixture]
pub fn test_pvc(#[default("Bound")] phase: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "PersistentVolumeClaim",
        "metadata": metadata(TEST_PVC, "pvc-uid", None),
        "spec": {
            "accessModes": ["ReadWriteOnce"],
            "storageClassName": "standard",
            "volumeName": "pvc-1234",
        },
        "status": {
            "phase": phase,
            "accessModes": ["ReadWriteOnce"],
            "capacity": {"storage": "1Gi"},
        },
    })
}

#[fixture]
pub fn test_configmap() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": metadata(TEST_CONFIGMAP, "configmap-uid", None),
        "data": {"app.properties": "color=blue", "log.level": "debug"},
    })
}

#[fixture]
pub fn test_secret() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": metadata(TEST_SECRET, "secret-uid", None),
        "type": "Opaque",
        "data": {"password": "aHVudGVyMg=="},
    })
}
