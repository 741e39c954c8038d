use anyhow::Result;
use clap::Parser;
use screentime::cli::{run_cli, Args};
use tracing::error;

fn main() -> Result<()> {
    run_cli(Args::parse()).inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
