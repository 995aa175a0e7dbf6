mod apply;
mod check;
mod exec;
mod resources;
mod session;

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use ks_core::errors::*;
use ks_core::logging;
use ks_core::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::*;

#[derive(Debug, Parser)]
#[command(
    about = "command-line app for watching Kubernetes resources until a deployment settles",
    version,
    propagate_version = true
)]
struct KsCommandRoot {
    #[command(subcommand)]
    subcommand: KsSubcommand,

    #[command(flatten)]
    global: GlobalArgs,
}

// Layered over the config file (if any); anything given here wins
#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    #[arg(short, long, global = true, long_help = "status check config file (YAML)")]
    pub config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        long_help = "directory the deployment step writes its manifests to",
        default_value = "."
    )]
    pub working_dir: PathBuf,

    #[arg(long, global = true, long_help = "deployment timeout in seconds; 0 waits forever")]
    pub timeout: Option<u64>,

    #[arg(
        long,
        global = true,
        long_help = "how long (in seconds) a finished deployment must hold its status before the check ends"
    )]
    pub stabilization_timeout: Option<u64>,

    #[arg(short, long, global = true, long_help = "namespace for resources that don't specify one")]
    pub namespace: Option<String>,

    #[arg(long, global = true, long_help = "treat Jobs as in progress until they complete")]
    pub wait_for_jobs: bool,

    #[arg(long, global = true, long_help = "path to a custom kubectl executable")]
    pub kubectl: Option<String>,

    #[arg(short, long, global = true, default_value = "info")]
    pub verbosity: String,
}

impl GlobalArgs {
    pub fn load_config(&self) -> anyhow::Result<StatusCheckConfig> {
        let mut config = match &self.config {
            Some(path) => StatusCheckConfig::load(path)?,
            None => StatusCheckConfig::default(),
        };

        if let Some(timeout) = self.timeout {
            config.deployment_timeout_seconds = timeout;
        }
        if let Some(timeout) = self.stabilization_timeout {
            config.stabilization_timeout_seconds = timeout;
        }
        if let Some(namespace) = &self.namespace {
            config.default_namespace.clone_from(namespace);
        }
        if self.wait_for_jobs {
            config.wait_for_jobs = true;
        }
        if self.kubectl.is_some() {
            config.kubectl_executable.clone_from(&self.kubectl);
        }
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
enum KsSubcommand {
    #[command(about = "list the resources a deployment step defines", visible_alias = "res")]
    Resources,

    #[command(about = "run a resource status check on the defined resources")]
    Check,

    #[command(about = "apply the step's manifests and watch them until they settle")]
    Apply,

    #[command(about = "run a command under a resource status check")]
    Exec(exec::Args),
}

async fn run(args: KsCommandRoot, shutdown: CancellationToken) -> anyhow::Result<i32> {
    let global = &args.global;
    match &args.subcommand {
        KsSubcommand::Resources => resources::cmd(global),
        KsSubcommand::Check => check::cmd(global, shutdown).await,
        KsSubcommand::Apply => apply::cmd(global, shutdown).await,
        KsSubcommand::Exec(exec_args) => exec::cmd(exec_args, global, shutdown).await,
    }
}

#[tokio::main]
async fn main() {
    let args = KsCommandRoot::parse();
    logging::setup_for_cli(&args.global.verbosity);

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing the current check");
            on_ctrl_c.cancel();
        }
    });

    match run(args, shutdown).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            kserr!(err, "kstatus failed");
            std::process::exit(1);
        },
    }
}

#[cfg(test)]
mod tests;
