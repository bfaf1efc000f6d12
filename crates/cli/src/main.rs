use std::io::Read;

use anyhow::Context;

use shopkeep_cli::{Session, StoreConfig, config};

fn main() -> anyhow::Result<()> {
    shopkeep_observability::init_with(config::log_format_from_env()?);

    let config = StoreConfig::from_env()?;

    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read script {path}"))?,
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            script
        }
    };

    tracing::info!(store = %config.store_name, money = %config.starting_money, "running script");

    let mut session = Session::from_config(&config);
    println!("{}", session.run_script(&script));

    Ok(())
}
