use eyre::Result;
use tracing::info;
use whenmeet_db::FileMeetingStore;

pub mod commands;
pub mod config;
pub mod handlers;

/// Runs a parsed command line against the local file store.
///
/// The store path comes from `--store` when given, otherwise from the
/// configuration. Returns the text to print on success.
pub async fn run(cli: commands::Cli, config: &config::CliConfig) -> Result<String> {
    let path = cli.store.unwrap_or_else(|| config.store_path.clone());
    info!(store = %path.display(), "Opening local store");

    let store = FileMeetingStore::new(path);
    handlers::execute(cli.command, &store, cli.json).await
}
