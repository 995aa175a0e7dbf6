use std::collections::HashMap;
use std::fs::File;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::prelude::*;

// Identifiers of the deployment this check runs on behalf of; they get stamped onto every
// outbound status notification so the receiving end can correlate them.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentContext {
    pub action_id: String,
    pub task_id: String,
    pub target_id: String,
    pub space_id: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestConfig {
    pub custom_resource_file_name: String,
    pub grouped_yaml_directories: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            custom_resource_file_name: DEFAULT_CUSTOM_RESOURCE_FILE_NAME.into(),
            grouped_yaml_directories: vec![],
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedResourceConfig {
    pub enabled: bool,
    pub name: String,
    pub has_data: bool,
}

impl ComputedResourceConfig {
    pub fn computed_name(&self) -> Option<&str> {
        (self.enabled && self.has_data && !self.name.is_empty()).then_some(self.name.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedResourcesConfig {
    pub config_map: ComputedResourceConfig,
    pub secret: ComputedResourceConfig,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCheckConfig {
    pub enabled: bool,
    pub deployment_timeout_seconds: u64,
    pub stabilization_timeout_seconds: u64,
    pub default_namespace: String,
    pub wait_for_jobs: bool,
    pub print_verbose_kubectl_output_on_error: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubectl_executable: Option<String>,
    pub environment: HashMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_wait: Option<String>,

    pub context: DeploymentContext,
    pub manifests: ManifestConfig,
    pub computed_resources: ComputedResourcesConfig,
}

impl Default for StatusCheckConfig {
    fn default() -> Self {
        StatusCheckConfig {
            enabled: true,
            deployment_timeout_seconds: 0,
            stabilization_timeout_seconds: 0,
            default_namespace: DEFAULT_NAMESPACE.into(),
            wait_for_jobs: false,
            print_verbose_kubectl_output_on_error: false,
            kubectl_executable: None,
            environment: HashMap::new(),
            deployment_style: None,
            deployment_wait: None,
            context: DeploymentContext::default(),
            manifests: ManifestConfig::default(),
            computed_resources: ComputedResourcesConfig::default(),
        }
    }
}

impl StatusCheckConfig {
    pub fn load(filename: &str) -> anyhow::Result<StatusCheckConfig> {
        Ok(serde_yaml::from_reader(File::open(filename)?)?)
    }

    pub fn default_namespace(&self) -> &str {
        if self.default_namespace.is_empty() { DEFAULT_NAMESPACE } else { &self.default_namespace }
    }

    // A zero timeout means "wait forever"
    pub fn deployment_timeout(&self) -> Option<Duration> {
        (self.deployment_timeout_seconds > 0).then(|| Duration::from_secs(self.deployment_timeout_seconds))
    }

    pub fn stabilization_timeout(&self) -> Duration {
        Duration::from_secs(self.stabilization_timeout_seconds)
    }

    pub fn hook_enabled(&self) -> bool {
        let is_blue_green = self
            .deployment_style
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(BLUE_GREEN_DEPLOYMENT_STYLE));
        let waits_elsewhere = self
            .deployment_wait
            .as_deref()
            .is_some_and(|w| w.eq_ignore_ascii_case(WAIT_DEPLOYMENT_WAIT));

        self.enabled && !is_blue_green && !waits_elsewhere
    }

    pub fn options(&self) -> Options {
        Options {
            wait_for_jobs: self.wait_for_jobs,
            print_verbose_kubectl_output_on_error: self.print_verbose_kubectl_output_on_error,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Options {
    pub wait_for_jobs: bool,
    pub print_verbose_kubectl_output_on_error: bool,
}
