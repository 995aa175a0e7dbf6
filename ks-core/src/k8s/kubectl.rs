use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tokio::process::Command;
use tracing::*;

use super::*;

// The read side of kubectl that the retriever needs.  An empty namespace means "don't pass -n",
// which is what cluster-scoped kinds want.  `None` covers every way a call can fail (spawn error,
// non-zero exit, blank output); callers check for it before parsing.
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait KubectlGet: Send + Sync {
    async fn get(&self, kind: &str, name: &str, namespace: &str) -> Option<String>;
    async fn get_all(&self, kind: &str, namespace: &str) -> Option<String>;
}

#[derive(Clone, Debug)]
pub struct Kubectl {
    executable: String,
    environment: HashMap<String, String>,
}

impl Kubectl {
    // Resolve and sanity-check the kubectl binary; this is the only fatal error a status check
    // can hit, and it happens before any polling starts.
    pub async fn try_new(custom_executable: Option<&str>, environment: HashMap<String, String>) -> anyhow::Result<Kubectl> {
        let executable = match custom_executable.filter(|e| !e.is_empty()) {
            Some(path) => {
                if !Path::new(path).is_file() {
                    return Err(KubernetesError::kubectl_not_found(path));
                }
                path.to_string()
            },
            None => DEFAULT_KUBECTL.to_string(),
        };

        let kubectl = Kubectl { executable, environment };
        if kubectl.run(&["version", "--client"]).await.is_none() {
            return Err(KubernetesError::kubectl_unusable(&kubectl.executable));
        }

        info!("using kubectl at {}", kubectl.executable);
        Ok(kubectl)
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub async fn apply(&self, path: &Path, namespace: &str) -> EmptyResult {
        let filename = path.to_string_lossy();
        let mut args = vec!["apply", "-f", filename.as_ref()];
        if path.is_dir() {
            args.push("--recursive");
        }
        if !namespace.is_empty() {
            args.extend(["-n", namespace]);
        }

        match self.run(&args).await {
            Some(output) => {
                info!("{}", output.trim_end());
                Ok(())
            },
            None => bail!("kubectl apply failed for {filename}"),
        }
    }

    async fn run(&self, args: &[&str]) -> Option<String> {
        debug!("running `{} {}`", self.executable, args.join(" "));
        let output = match Command::new(&self.executable)
            .args(args)
            .envs(&self.environment)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                debug!("could not run {}: {err}", self.executable);
                return None;
            },
        };

        if !output.status.success() {
            debug!(
                "`{} {}` exited with {}: {}",
                self.executable,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            debug!("`{} {}` returned no output", self.executable, args.join(" "));
            return None;
        }
        Some(stdout)
    }
}

fn get_args<'a>(kind: &'a str, name: Option<&'a str>, namespace: &'a str) -> Vec<&'a str> {
    let mut args = vec!["get", kind];
    if let Some(name) = name {
        args.push(name);
    }
    args.extend(["-o", "json"]);
    if !namespace.is_empty() {
        args.extend(["-n", namespace]);
    }
    args
}

#[async_trait]
impl KubectlGet for Kubectl {
    async fn get(&self, kind: &str, name: &str, namespace: &str) -> Option<String> {
        self.run(&get_args(kind, Some(name), namespace)).await
    }

    async fn get_all(&self, kind: &str, namespace: &str) -> Option<String> {
        self.run(&get_args(kind, None, namespace)).await
    }
}
