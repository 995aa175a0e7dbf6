use super::*;

fn pod_status(resource: &Resource) -> &PodDetails {
    match &resource.details {
        ResourceDetails::Pod(details) => details,
        other => panic!("expected pod details, got {other:?}"),
    }
}

#[rstest]
fn test_collects_ready_and_restarts() {
    let statuses = vec![
        container_status("web", running(), true, 0),
        container_status("sidecar", waiting("CrashLoopBackOff"), false, 3),
    ];
    let pod = materialize(pod_json("Pending", vec![], statuses), Options::default());

    let details = pod_status(&pod);
    assert_eq!(details.ready, "1/2");
    assert_eq!(details.restarts, 3);
    assert_eq!(pod.status, ResourceStatus::Failed);
}

#[rstest]
#[case::unschedulable("Pending", vec![], vec![], "Pending", ResourceStatus::InProgress)]
#[case::init_in_progress(
    "Pending",
    vec![waiting("PodInitializing"), terminated("Completed", 0)],
    vec![],
    "Init:1/2",
    ResourceStatus::InProgress,
)]
#[case::init_pull_backoff("Pending", vec![waiting("ImagePullBackOff")], vec![], "Init:ImagePullBackOff", ResourceStatus::Failed)]
#[case::init_crash_loop("Pending", vec![waiting("CrashLoopBackOff")], vec![], "Init:CrashLoopBackOff", ResourceStatus::Failed)]
#[case::container_creating("Pending", vec![], vec![waiting("ContainerCreating")], "ContainerCreating", ResourceStatus::InProgress)]
#[case::pull_backoff("Pending", vec![], vec![waiting("ImagePullBackOff")], "ImagePullBackOff", ResourceStatus::Failed)]
#[case::crash_loop("Pending", vec![], vec![waiting("CrashLoopBackOff")], "CrashLoopBackOff", ResourceStatus::Failed)]
#[case::cannot_run(
    "Failed",
    vec![],
    vec![terminated("ContainerCannotRun", 128)],
    "ContainerCannotRun",
    ResourceStatus::Failed,
)]
#[case::error("Failed", vec![], vec![terminated("Error", 1)], "Error", ResourceStatus::Failed)]
#[case::completed("Succeeded", vec![], vec![terminated("Completed", 0)], "Completed", ResourceStatus::Successful)]
#[case::running("Running", vec![], vec![running()], "Running", ResourceStatus::Successful)]
#[case::first_error_wins(
    "Pending",
    vec![],
    vec![waiting("ImagePullBackOff"), waiting("CrashLoopBackOff")],
    "ImagePullBackOff",
    ResourceStatus::Failed,
)]
#[case::failure_beats_creating(
    "Pending",
    vec![],
    vec![waiting("ContainerCreating"), waiting("ErrImagePull")],
    "ErrImagePull",
    ResourceStatus::Failed,
)]
fn test_pod_status(
    #[case] phase: &str,
    #[case] init_states: Vec<Value>,
    #[case] states: Vec<Value>,
    #[case] expected_text: &str,
    #[case] expected_status: ResourceStatus,
) {
    let pod = materialize(
        pod_json(phase, container_statuses(init_states), container_statuses(states)),
        Options::default(),
    );

    assert_eq!(pod_status(&pod).status, expected_text);
    assert_eq!(pod.status, expected_status);
}

#[rstest]
fn test_pod_without_status() {
    let mut pod = test_pod("Running");
    pod.as_object_mut().unwrap().remove("status");

    let pod = materialize(pod, Options::default());
    assert_eq!(pod.status, ResourceStatus::InProgress);
    assert_eq!(pod_status(&pod).status, "Pending");
}
