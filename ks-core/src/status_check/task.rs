use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::*;

use super::*;
use crate::reporter::ResourceUpdateReporter;
use crate::retriever::ResourceRetriever;

pub struct ResourceStatusCheckTask {
    retriever: Arc<dyn ResourceRetriever>,
    reporter: Arc<dyn ResourceUpdateReporter>,
}

impl ResourceStatusCheckTask {
    pub fn new(
        retriever: Arc<dyn ResourceRetriever>,
        reporter: Arc<dyn ResourceUpdateReporter>,
    ) -> ResourceStatusCheckTask {
        ResourceStatusCheckTask { retriever, reporter }
    }

    // Poll until the deployment settles, the timer runs out, or one of the tokens fires.  `cancel`
    // stops at the next opportunity without another tick; `drain` lets one more tick complete so
    // the reporter sees the final state.  `seed` is the result of a previous run in the same
    // session, which keeps check counts increasing and avoids re-reporting unchanged resources.
    pub async fn run(
        &self,
        resources: Vec<ResourceIdentifier>,
        options: Options,
        mut timer: Timer,
        seed: StatusCheckResult,
        cancel: CancellationToken,
        drain: CancellationToken,
    ) -> TaskOutcome {
        let mut last = StatusCheckResult { defined_resources: resources.clone(), ..seed };
        if resources.is_empty() {
            info!("no resources to check");
            last.deployment_status = DeploymentStatus::Succeeded;
            return TaskOutcome { result: last, stop_reason: StopReason::Completed };
        }

        for id in &resources {
            debug!("watching {id}");
        }

        timer.start();
        loop {
            if cancel.is_cancelled() {
                return TaskOutcome { result: last, stop_reason: StopReason::Cancelled };
            }

            let previous_status = last.deployment_status;
            last = self.tick(&resources, &options, last).await;

            if drain.is_cancelled() {
                return TaskOutcome { result: last, stop_reason: StopReason::Drained };
            }

            if !timer.should_continue(previous_status, last.deployment_status) {
                let stop_reason = if last.deployment_status.is_terminal() {
                    StopReason::Completed
                } else {
                    StopReason::TimedOut
                };
                return TaskOutcome { result: last, stop_reason };
            }

            tokio::select! {
                _ = timer.wait_for_interval() => (),
                _ = cancel.cancelled() => (),
                // wake up early so the last tick happens right away
                _ = drain.cancelled() => (),
            }
        }
    }

    async fn tick(&self, resources: &[ResourceIdentifier], options: &Options, last: StatusCheckResult) -> StatusCheckResult {
        let mut roots = vec![];
        for (id, res) in resources.iter().zip(self.retriever.get_all_resources(resources, options).await) {
            match res {
                Ok(root) => roots.push(root),
                Err(err) => debug!("{id} is not available yet: {err}"),
            }
        }

        let deployment_status = aggregate(&roots, resources);
        let snapshot = snapshot_of(&roots);
        let check_count = last.check_count + 1;
        self.reporter.report_updated_resources(&last.resource_statuses, &snapshot, check_count);
        debug!("check {check_count}: deployment is {deployment_status}");

        StatusCheckResult {
            defined_resources: resources.to_vec(),
            defined_resource_statuses: roots,
            resource_statuses: snapshot,
            deployment_status,
            check_count,
        }
    }
}
