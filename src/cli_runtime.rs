use anyhow::{Context, Result};
use clap::Parser;

use blobdock::model::StoreSettings;
use blobdock::store::LocalStore;

use crate::cli_subcommands::Commands;

#[derive(Parser)]
#[command(name = "blobdock")]
#[command(about = "Note attachment uploads and remote store explorer", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => blobdock::tui_shell::run()?,
        Some(command) => crate::cli_exec::handle_command(command)?,
    }

    Ok(())
}

pub(crate) fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(crate) fn require_settings(store: &LocalStore) -> Result<StoreSettings> {
    let cfg = store.read_config()?;
    cfg.store
        .context("no remote store configured (run `blobdock login --url ... --token ...`)")
}
