use std::path::{
    Path,
    PathBuf,
};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::*;
use walkdir::WalkDir;

use crate::errors::*;
use crate::manifest::parse_manifests;
use crate::prelude::*;
use crate::status_check::{
    ResourceStatusCheckTask,
    RunningResourceStatusCheck,
    RunningStatusCheck,
};

err_impl! {HookError,
    #[error("could not read manifest file {0}")]
    UnreadableManifest(String),

    #[error("step command could not be started: {0}")]
    CommandFailed(String),
}

// Every manifest file the step may have written, in the order it applies them.  Grouped
// directories win when configured; otherwise it's the fixed set of files in the working directory.
pub fn manifest_files(config: &StatusCheckConfig, working_dir: &Path) -> Vec<PathBuf> {
    let grouped = &config.manifests.grouped_yaml_directories;
    if !grouped.is_empty() {
        return grouped.iter().flat_map(|dir| files_in(&working_dir.join(dir))).collect();
    }

    [
        SECRET_MANIFEST_FILE,
        config.manifests.custom_resource_file_name.as_str(),
        DEPLOYMENT_MANIFEST_FILE,
        SERVICE_MANIFEST_FILE,
        INGRESS_MANIFEST_FILE,
    ]
    .iter()
    .map(|name| working_dir.join(name))
    .filter(|path| path.is_file())
    .collect()
}

// Recursive, sorted by name so that discovery order is stable
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping manifest path: {err}");
                None
            },
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

pub fn resources_in_files(files: &[PathBuf], default_namespace: &str) -> anyhow::Result<Vec<ResourceIdentifier>> {
    let mut manifests = Vec::with_capacity(files.len());
    for file in files {
        let contents = std::fs::read_to_string(file).map_err(|err| {
            debug!("{err}");
            HookError::unreadable_manifest(&file.to_string_lossy())
        })?;
        manifests.push(contents);
    }
    Ok(parse_manifests(&manifests, default_namespace).collect())
}

// Everything the step is expected to create: the resources in its manifests, plus the ConfigMap
// and Secret it computes for itself when those features are turned on
pub fn find_defined_resources(config: &StatusCheckConfig, working_dir: &Path) -> anyhow::Result<Vec<ResourceIdentifier>> {
    let namespace = config.default_namespace();
    let mut resources = resources_in_files(&manifest_files(config, working_dir), namespace)?;

    let computed = &config.computed_resources;
    if let Some(name) = computed.secret.computed_name() {
        resources.push(ResourceIdentifier::new(SECRET_GVK.clone(), name, Some(namespace)));
    }
    if let Some(name) = computed.config_map.computed_name() {
        resources.push(ResourceIdentifier::new(CONFIGMAP_GVK.clone(), name, Some(namespace)));
    }

    Ok(resources)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepResult {
    pub exit_code: i32,
}

impl StepResult {
    pub fn success() -> StepResult {
        StepResult { exit_code: 0 }
    }

    pub fn failure() -> StepResult {
        StepResult { exit_code: 1 }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

// The work that the status check wraps.  Steps that apply more resources as they go can tell
// the running check about them; `check` is None when the hook is disabled.
#[async_trait]
pub trait DeploymentStep: Send + Sync {
    async fn execute(&self, check: Option<&dyn RunningStatusCheck>) -> anyhow::Result<StepResult>;
}

// Runs an arbitrary command as the deployment step
pub struct CommandStep {
    pub cmd: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

#[async_trait]
impl DeploymentStep for CommandStep {
    async fn execute(&self, _: Option<&dyn RunningStatusCheck>) -> anyhow::Result<StepResult> {
        info!("running step command `{} {}`", self.cmd, self.args.join(" "));
        let status = Command::new(&self.cmd)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|err| HookError::command_failed(&format!("{}: {err}", self.cmd)))?;

        // killed by a signal
        let exit_code = status.code().unwrap_or(1);
        Ok(StepResult { exit_code })
    }
}

pub struct ResourceStatusReportHook {
    config: StatusCheckConfig,
    working_dir: PathBuf,
    task: Arc<ResourceStatusCheckTask>,
}

impl ResourceStatusReportHook {
    pub fn new(config: StatusCheckConfig, working_dir: &Path, task: Arc<ResourceStatusCheckTask>) -> Self {
        ResourceStatusReportHook { config, working_dir: working_dir.into(), task }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.hook_enabled()
    }

    pub async fn execute(&self, step: &dyn DeploymentStep, shutdown: CancellationToken) -> anyhow::Result<StepResult> {
        if !self.is_enabled() {
            debug!("resource status check is disabled for this step");
            return step.execute(None).await;
        }

        let resources = find_defined_resources(&self.config, &self.working_dir)?;
        if resources.is_empty() {
            info!("Resource Status Check: waiting for resources to be applied");
        } else {
            debug!("performing resource status checks on the following resources:");
            for id in &resources {
                debug!(" - {id}");
            }
        }

        let check = RunningResourceStatusCheck::start(
            self.task.clone(),
            self.config.options(),
            self.config.deployment_timeout(),
            self.config.stabilization_timeout(),
            resources,
        );

        match step.execute(Some(&check as &dyn RunningStatusCheck)).await {
            Ok(result) if result.is_success() => {
                if check.wait_for_completion_or_timeout(shutdown).await? {
                    Ok(result)
                } else {
                    Ok(StepResult::failure())
                }
            },
            // The step's own failure is what the caller needs to see; the check just gets one
            // last tick so the final state is reported.
            step_result => {
                drain(&check).await;
                step_result
            },
        }
    }
}

async fn drain(check: &RunningResourceStatusCheck) {
    let shutdown = CancellationToken::new();
    shutdown.cancel();
    if let Err(err) = check.wait_for_completion_or_timeout(shutdown).await {
        warn!("resource status check did not stop cleanly: {err}");
    }
}
