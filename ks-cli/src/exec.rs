use ks_core::hook::{
    CommandStep,
    ResourceStatusReportHook,
};
use tokio_util::sync::CancellationToken;

use crate::GlobalArgs;
use crate::session::Session;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(
        long_help = "the command (and its arguments) that performs the deployment",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true
    )]
    pub command: Vec<String>,
}

pub async fn cmd(args: &Args, global: &GlobalArgs, shutdown: CancellationToken) -> anyhow::Result<i32> {
    let config = global.load_config()?;
    let session = Session::new(&config).await?;

    let (cmd, cmd_args) = args.command.split_first().ok_or(anyhow::anyhow!("no command given"))?;
    let step = CommandStep {
        cmd: cmd.clone(),
        args: cmd_args.to_vec(),
        working_dir: global.working_dir.clone(),
    };

    let hook = ResourceStatusReportHook::new(config, &global.working_dir, session.task);
    Ok(hook.execute(&step, shutdown).await?.exit_code)
}
