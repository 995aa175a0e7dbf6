use ks_core::hook::find_defined_resources;
use ks_core::status_check::{
    RunningResourceStatusCheck,
    RunningStatusCheck,
};
use tokio_util::sync::CancellationToken;
use tracing::*;

use crate::GlobalArgs;
use crate::session::Session;

pub async fn cmd(global: &GlobalArgs, shutdown: CancellationToken) -> anyhow::Result<i32> {
    let config = global.load_config()?;
    let resources = find_defined_resources(&config, &global.working_dir)?;
    if resources.is_empty() {
        info!("no defined resources were found, skipping resource status check");
        return Ok(0);
    }

    let session = Session::new(&config).await?;
    let check = RunningResourceStatusCheck::start(
        session.task.clone(),
        config.options(),
        config.deployment_timeout(),
        config.stabilization_timeout(),
        resources,
    );

    let succeeded = check.wait_for_completion_or_timeout(shutdown).await?;
    Ok(if succeeded { 0 } else { 1 })
}
