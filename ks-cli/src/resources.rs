use ks_core::hook::find_defined_resources;

use crate::GlobalArgs;

pub fn cmd(global: &GlobalArgs) -> anyhow::Result<i32> {
    let config = global.load_config()?;
    for id in find_defined_resources(&config, &global.working_dir)? {
        println!("{}", serde_json::to_string(&id)?);
    }
    Ok(0)
}
