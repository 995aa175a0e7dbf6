use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub completions: String,
    pub active: i32,
    pub succeeded: i32,
    pub failed: i32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobDetails {
    pub schedule: String,
    pub suspend: bool,
    pub active: usize,
}

fn has_condition(job_status: Option<&batchv1::JobStatus>, type_: &str) -> bool {
    job_status
        .and_then(|s| s.conditions.as_ref())
        .into_iter()
        .flatten()
        .any(|c| c.type_ == type_ && c.status == "True")
}

impl ResourceStatusExt for batchv1::Job {
    fn status_and_details(&self, options: &Options) -> (ResourceStatus, ResourceDetails) {
        let job_status = self.status.as_ref();
        let completions = self.spec.as_ref().and_then(|s| s.completions).unwrap_or(1);
        let succeeded = job_status.and_then(|s| s.succeeded).unwrap_or(0);

        let details = JobDetails {
            completions: format!("{succeeded}/{completions}"),
            active: job_status.and_then(|s| s.active).unwrap_or(0),
            succeeded,
            failed: job_status.and_then(|s| s.failed).unwrap_or(0),
        };

        // Unless the step asked to wait for jobs, a job that exists is good enough
        if !options.wait_for_jobs {
            return (ResourceStatus::Successful, ResourceDetails::Job(details));
        }

        let status = if has_condition(job_status, "Failed") {
            ResourceStatus::Failed
        } else if has_condition(job_status, "Complete") || succeeded >= completions {
            ResourceStatus::Successful
        } else {
            ResourceStatus::InProgress
        };
        (status, ResourceDetails::Job(details))
    }
}

impl ResourceStatusExt for batchv1::CronJob {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let spec = self.spec.as_ref();
        let details = CronJobDetails {
            schedule: spec.map(|s| s.schedule.clone()).unwrap_or_default(),
            suspend: spec.and_then(|s| s.suspend).unwrap_or(false),
            active: self.status.as_ref().and_then(|s| s.active.as_ref()).map_or(0, |a| a.len()),
        };
        (ResourceStatus::Successful, ResourceDetails::CronJob(details))
    }
}
