//! Entry point: wires configuration, persistence, and the console menus.

use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use circulation::config::Cli;
use circulation::domain::{Directory, LibraryStore};
use circulation::inbound::SessionController;
use circulation::outbound::JsonFileStore;

/// Application bootstrap.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // Diagnostics go to stderr so the menus own stdout.
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let repo = JsonFileStore::new(cli.data_file);
    let store = LibraryStore::open(repo, Arc::new(DefaultClock));
    let directory = Directory::with_default_accounts();

    SessionController::new(store, directory).run();
    Ok(())
}
