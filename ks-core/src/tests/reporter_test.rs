use assertables::*;

use super::*;
use crate::config::DeploymentContext;
use crate::resources::ResourceDetails;

fn materialize(obj: Value) -> Resource {
    Resource::from_value(obj, &Options::default()).unwrap()
}

fn snapshot(resources: Vec<Resource>) -> Snapshot {
    resources.into_iter().map(|r| (r.uid.clone(), r)).collect()
}

#[fixture]
fn context() -> DeploymentContext {
    DeploymentContext {
        action_id: "Actions-7".into(),
        task_id: "ServerTasks-42".into(),
        target_id: "Machines-3".into(),
        space_id: "Spaces-1".into(),
    }
}

#[rstest]
fn test_diff_same_snapshot_is_empty(test_deployment: Value, test_service: Value) {
    let current = snapshot(vec![materialize(test_deployment), materialize(test_service)]);
    let unchanged = current.clone();
    assert_is_empty!(&diff_snapshots(&current, &unchanged));
}

#[rstest]
fn test_diff_first_tick_is_all_upserts(test_deployment: Value, test_service: Value) {
    let current = snapshot(vec![materialize(test_deployment), materialize(test_service)]);
    let previous = Snapshot::new();
    let changes = diff_snapshots(&previous, &current);

    assert_len_eq_x!(&changes, 2);
    assert!(changes.iter().all(|c| matches!(c, Change::Upserted(_))));
}

#[rstest]
#[case::status(|r: &mut Resource| r.status = ResourceStatus::Failed)]
#[case::details(|r: &mut Resource| r.details = ResourceDetails::Generic {})]
#[case::name(|r: &mut Resource| r.name = "renamed".into())]
fn test_diff_single_change(test_deployment: Value, test_service: Value, #[case] change: fn(&mut Resource)) {
    let previous = snapshot(vec![materialize(test_deployment), materialize(test_service)]);
    let mut current = previous.clone();
    change(current.get_mut(TEST_DEPLOYMENT_UID).unwrap());

    let changes = diff_snapshots(&previous, &current);
    assert_len_eq_x!(&changes, 1);
    assert_eq!(changes[0].resource().uid, TEST_DEPLOYMENT_UID);
}

#[rstest]
fn test_diff_removed(test_deployment: Value, test_service: Value) {
    let previous = snapshot(vec![materialize(test_deployment.clone()), materialize(test_service)]);
    let current = snapshot(vec![materialize(test_deployment)]);

    let changes = diff_snapshots(&previous, &current);
    assert_eq!(changes, vec![Change::Removed(&previous[TEST_SERVICE_UID])]);
}

#[rstest]
fn test_reporter_sends_updates(context: DeploymentContext, test_service: Value, test_deployment: Value) {
    let sink = RecordingSink::default();
    let reporter = StatusUpdateReporter::new(context, Box::new(sink.clone()));

    let first = snapshot(vec![materialize(test_service.clone())]);
    reporter.report_updated_resources(&Snapshot::new(), &first, 1);
    reporter.report_updated_resources(&first, &first, 2);
    reporter.report_updated_resources(&first, &snapshot(vec![materialize(test_deployment)]), 3);

    let updates = sink.recorded();
    assert_len_eq_x!(&updates, 3);

    let svc = &updates[0];
    assert_eq!(svc.action_id, "Actions-7");
    assert_eq!(svc.space_id, "Spaces-1");
    assert_eq!(svc.uuid, TEST_SERVICE_UID);
    assert_eq!((svc.group.as_str(), svc.version.as_str(), svc.kind.as_str()), ("", "v1", SERVICE_KIND));
    assert_eq!(svc.namespace, TEST_NAMESPACE);
    assert_eq!(svc.status, ResourceStatus::Successful);
    assert!(!svc.removed);
    assert_eq!(svc.check_count, 1);

    let data: Value = serde_json::from_str(&svc.data).unwrap();
    assert_eq!(data["type"], "NodePort");
    assert_eq!(data["ports"][0], "80:30080/TCP");

    assert_eq!(updates[1].uuid, TEST_DEPLOYMENT_UID);
    assert_eq!(updates[1].check_count, 3);
    assert!(updates[2].removed);
    assert_eq!(updates[2].uuid, TEST_SERVICE_UID);
}

#[rstest]
fn test_reporter_skips_empty_namespace(context: DeploymentContext, test_pvc: Value) {
    let sink = RecordingSink::default();
    let reporter = StatusUpdateReporter::new(context, Box::new(sink.clone()));

    let mut pvc = materialize(test_pvc);
    pvc.namespace = String::new();
    reporter.report_updated_resources(&Snapshot::new(), &snapshot(vec![pvc]), 1);

    assert_is_empty!(&sink.recorded());
}

#[rstest]
fn test_status_update_wire_names(context: DeploymentContext, test_secret: Value) {
    let secret = materialize(test_secret);
    let update = StatusUpdate::new(&context, Change::Upserted(&secret), 5).unwrap();
    let wire = serde_json::to_value(&update).unwrap();

    for field in [
        "ActionId", "TaskId", "TargetId", "SpaceId", "Uuid", "Group", "Version", "Kind", "Name", "Namespace", "Status",
        "Data", "Removed", "CheckCount",
    ] {
        assert!(wire.get(field).is_some(), "missing {field}");
    }
    assert_eq!(wire["Status"], "Successful");

    // secret values never leave the cluster
    assert!(!update.data.contains("aHVudGVyMg=="));
}
