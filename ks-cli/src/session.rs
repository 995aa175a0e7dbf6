use std::sync::Arc;

use ks_core::k8s::Kubectl;
use ks_core::prelude::*;
use ks_core::reporter::{
    JsonLinesSink,
    StatusUpdateReporter,
};
use ks_core::retriever::KubectlResourceRetriever;
use ks_core::status_check::ResourceStatusCheckTask;

// The pieces every status-checking subcommand needs; notifications go to stdout as JSON lines
pub struct Session {
    pub kubectl: Kubectl,
    pub task: Arc<ResourceStatusCheckTask>,
}

impl Session {
    pub async fn new(config: &StatusCheckConfig) -> anyhow::Result<Session> {
        let kubectl = Kubectl::try_new(config.kubectl_executable.as_deref(), config.environment.clone()).await?;

        let retriever = KubectlResourceRetriever::new(Box::new(kubectl.clone()));
        let reporter = StatusUpdateReporter::new(config.context.clone(), Box::new(JsonLinesSink::stdout()));
        let task = ResourceStatusCheckTask::new(Arc::new(retriever), Arc::new(reporter));

        Ok(Session { kubectl, task: Arc::new(task) })
    }
}
