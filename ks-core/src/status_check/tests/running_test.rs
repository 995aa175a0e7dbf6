use std::sync::Arc;
use std::time::Duration;

use assertables::*;
use tokio_util::sync::CancellationToken;
use tracing_test::traced_test;

use super::*;

fn start_check(ticks: Vec<ScriptedTick>, deployment_timeout: Option<Duration>) -> RunningResourceStatusCheck {
    let task = ResourceStatusCheckTask::new(
        Arc::new(ScriptedRetriever::new(ticks)),
        Arc::new(RecordingReporter::default()),
    );
    RunningResourceStatusCheck::start(
        Arc::new(task),
        Options::default(),
        deployment_timeout,
        Duration::ZERO,
        vec![test_id(&DEPLOYMENT_GVK, "web")],
    )
}

fn api() -> Resource {
    test_resource(&SERVICE_GVK, "api", "api-uid", ResourceStatus::Successful)
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_succeeded() {
    let check = start_check(vec![vec![Some(deployment_tree("web", ResourceStatus::Successful))]], None);

    assert!(check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert!(logs_contain(STATUS_CHECK_SUCCEEDED_MSG));
    assert_eq!(check.last_result().await.deployment_status, DeploymentStatus::Succeeded);
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_failed() {
    let tree = deployment_tree_with_pod("web", ResourceStatus::Successful, ResourceStatus::Failed);
    let check = start_check(vec![vec![Some(tree)]], None);

    assert!(!check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert!(logs_contain(STATUS_CHECK_FAILED_MSG));
    assert!(logs_contain("web-rs-pod"));
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_timed_out() {
    let check = start_check(
        vec![vec![Some(deployment_tree("web", ResourceStatus::InProgress))]],
        Some(Duration::from_secs(10)),
    );

    assert!(!check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert!(logs_contain(STATUS_CHECK_TIMED_OUT_MSG));

    // the last tick is still available to the caller
    let last = check.last_result().await;
    assert_eq!(last.deployment_status, DeploymentStatus::InProgress);
    assert_len_eq_x!(&last.resource_statuses, 3);
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_timed_out_never_created() {
    let check = start_check(vec![vec![None]], Some(Duration::from_secs(4)));

    assert!(!check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert!(logs_contain("was not created by the end of the timeout"));
    assert!(logs_contain(STATUS_CHECK_TIMED_OUT_MSG));
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_timed_out_unknown_cluster_scoped_kind() {
    let widget_gvk = GVK::new("example.com", "v1", "ClusterWidget");
    let mut widget = test_resource(&widget_gvk, "widget", "widget-uid", ResourceStatus::InProgress);
    widget.namespace = String::new();

    let task = ResourceStatusCheckTask::new(
        Arc::new(ScriptedRetriever::new(vec![vec![Some(widget)]])),
        Arc::new(RecordingReporter::default()),
    );
    let check = RunningResourceStatusCheck::start(
        Arc::new(task),
        Options::default(),
        Some(Duration::from_secs(4)),
        Duration::ZERO,
        vec![test_id(&widget_gvk, "widget")],
    );

    assert!(!check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert!(logs_contain(STATUS_CHECK_TIMED_OUT_MSG));
    assert!(!logs_contain("was not created by the end of the timeout"));
}

#[rstest]
#[case::same_namespace(TESTUTILS_NAMESPACE, "web", true)]
#[case::observed_without_namespace("", "web", true)]
#[case::other_namespace("elsewhere", "web", false)]
#[case::other_name(TESTUTILS_NAMESPACE, "api", false)]
fn test_is_observed_as(#[case] namespace: &str, #[case] name: &str, #[case] expected: bool) {
    let mut resource = test_resource(&DEPLOYMENT_GVK, name, "uid", ResourceStatus::Successful);
    resource.namespace = namespace.into();
    assert_eq!(is_observed_as(&test_id(&DEPLOYMENT_GVK, "web"), &resource), expected);
}

#[rstest]
#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_wait_shutdown_is_graceful() {
    let check = start_check(vec![vec![Some(deployment_tree("web", ResourceStatus::InProgress))]], None);
    tokio::time::sleep(Duration::from_secs(5)).await;

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    assert!(check.wait_for_completion_or_timeout(shutdown).await.unwrap());
    assert!(logs_contain(STATUS_CHECK_STOPPED_MSG));

    // ticks at 0, 2 and 4 seconds, plus the one the drain asked for
    assert_eq!(check.last_result().await.check_count, 4);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_add_resources_restarts_poll() {
    let check = start_check(
        vec![
            vec![Some(deployment_tree("web", ResourceStatus::InProgress))],
            vec![Some(deployment_tree("web", ResourceStatus::Successful)), Some(api())],
        ],
        None,
    );
    tokio::time::sleep(Duration::from_secs(1)).await;

    check
        .add_resources(vec![test_id(&DEPLOYMENT_GVK, "web"), test_id(&SERVICE_GVK, "api")])
        .await
        .unwrap();
    assert_eq!(check.watched_resources().await, vec![test_id(&DEPLOYMENT_GVK, "web"), test_id(&SERVICE_GVK, "api")]);

    assert!(check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    let last = check.last_result().await;
    assert_eq!(last.check_count, 2);
    assert_len_eq_x!(&last.defined_resource_statuses, 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_add_resources_watched_set_only_grows() {
    let check = start_check(vec![vec![Some(deployment_tree("web", ResourceStatus::InProgress))]], None);
    let (web, api, db, cache) = (
        test_id(&DEPLOYMENT_GVK, "web"),
        test_id(&SERVICE_GVK, "api"),
        test_id(&STATEFULSET_GVK, "db"),
        test_id(&CONFIGMAP_GVK, "cache"),
    );

    let mut expected = vec![web.clone()];
    for batch in [
        vec![api.clone()],
        vec![web.clone(), db.clone()],
        vec![],
        vec![cache.clone(), cache.clone(), api.clone()],
    ] {
        for id in &batch {
            if !expected.contains(id) {
                expected.push(id.clone());
            }
        }
        check.add_resources(batch).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(check.watched_resources().await, expected);
    }
    assert_eq!(expected, vec![web, api, db, cache]);

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    assert!(check.wait_for_completion_or_timeout(shutdown).await.unwrap());
    assert_eq!(check.last_result().await.defined_resources, expected);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_add_resources_after_poll_finished() {
    let check = start_check(
        vec![
            vec![Some(deployment_tree("web", ResourceStatus::Successful))],
            vec![Some(deployment_tree("web", ResourceStatus::Successful)), None],
            vec![Some(deployment_tree("web", ResourceStatus::Successful)), Some(api())],
        ],
        None,
    );
    tokio::time::sleep(Duration::from_secs(1)).await;

    check.add_resources(vec![test_id(&SERVICE_GVK, "api")]).await.unwrap();
    assert!(check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert_eq!(check.last_result().await.check_count, 3);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_wait_only_once() {
    let check = start_check(vec![vec![Some(deployment_tree("web", ResourceStatus::Successful))]], None);

    assert!(check.wait_for_completion_or_timeout(CancellationToken::new()).await.unwrap());
    assert_err!(check.wait_for_completion_or_timeout(CancellationToken::new()).await);
    assert_err!(check.add_resources(vec![test_id(&SERVICE_GVK, "api")]).await);
}
