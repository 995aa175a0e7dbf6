use std::path::PathBuf;

use async_trait::async_trait;
use ks_core::hook::{
    DeploymentStep,
    ResourceStatusReportHook,
    StepResult,
    files_in,
    manifest_files,
    resources_in_files,
};
use ks_core::k8s::Kubectl;
use ks_core::prelude::*;
use ks_core::status_check::RunningStatusCheck;
use tokio_util::sync::CancellationToken;
use tracing::*;

use crate::GlobalArgs;
use crate::session::Session;

// Applies each manifest group in order, and tells the running check about each group's
// resources as soon as they're in the cluster
pub struct ApplyStep {
    kubectl: Kubectl,
    groups: Vec<PathBuf>,
    namespace: String,
}

pub fn manifest_groups(config: &StatusCheckConfig, global: &GlobalArgs) -> Vec<PathBuf> {
    let grouped = &config.manifests.grouped_yaml_directories;
    if grouped.is_empty() {
        manifest_files(config, &global.working_dir)
    } else {
        grouped.iter().map(|dir| global.working_dir.join(dir)).collect()
    }
}

#[async_trait]
impl DeploymentStep for ApplyStep {
    async fn execute(&self, check: Option<&dyn RunningStatusCheck>) -> anyhow::Result<StepResult> {
        for group in &self.groups {
            if let Err(err) = self.kubectl.apply(group, &self.namespace).await {
                error!("{err}");
                return Ok(StepResult::failure());
            }

            if let Some(check) = check {
                let files = if group.is_dir() { files_in(group) } else { vec![group.clone()] };
                check.add_resources(resources_in_files(&files, &self.namespace)?).await?;
            }
        }
        Ok(StepResult::success())
    }
}

pub async fn cmd(global: &GlobalArgs, shutdown: CancellationToken) -> anyhow::Result<i32> {
    let config = global.load_config()?;
    let session = Session::new(&config).await?;

    let groups = manifest_groups(&config, global);
    if groups.is_empty() {
        warn!("nothing to apply in {}", global.working_dir.display());
        return Ok(0);
    }

    let step = ApplyStep {
        kubectl: session.kubectl.clone(),
        groups,
        namespace: config.default_namespace().into(),
    };
    let hook = ResourceStatusReportHook::new(config, &global.working_dir, session.task);
    Ok(hook.execute(&step, shutdown).await?.exit_code)
}
