use super::*;

fn waiting_for_jobs() -> Options {
    Options { wait_for_jobs: true, ..Default::default() }
}

#[rstest]
#[case::running(0, None, ResourceStatus::InProgress)]
#[case::succeeded(1, None, ResourceStatus::Successful)]
#[case::complete_condition(0, Some("Complete"), ResourceStatus::Successful)]
#[case::failed_condition(0, Some("Failed"), ResourceStatus::Failed)]
fn test_job_status_when_waiting(
    #[case] succeeded: i32,
    #[case] condition: Option<&str>,
    #[case] expected: ResourceStatus,
) {
    let job = materialize(test_job(succeeded, condition), waiting_for_jobs());
    assert_eq!(job.status, expected);
}

#[rstest]
#[case::running(0, None)]
#[case::failed(0, Some("Failed"))]
fn test_job_status_when_not_waiting(#[case] succeeded: i32, #[case] condition: Option<&str>) {
    let job = materialize(test_job(succeeded, condition), Options::default());
    assert_eq!(job.status, ResourceStatus::Successful);
}

#[rstest]
fn test_job_details(#[with(1)] test_job: Value) {
    let job = materialize(test_job, waiting_for_jobs());
    assert_eq!(
        job.details,
        ResourceDetails::Job(JobDetails { completions: "1/1".into(), active: 0, succeeded: 1, failed: 0 })
    );
}

#[rstest]
fn test_cronjob_details(test_cronjob: Value) {
    let cj = materialize(test_cronjob, waiting_for_jobs());
    assert_eq!(cj.status, ResourceStatus::Successful);
    assert_eq!(
        cj.details,
        ResourceDetails::CronJob(CronJobDetails { schedule: "*/5 * * * *".into(), suspend: false, active: 0 })
    );
    assert_eq!(cj.supported_kind().and_then(|k| k.child()), Some(SupportedKind::Job));
}
