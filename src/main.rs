//! Entry point: parse CLI, set up logging, build the backend and dispatch.

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use volley_league::{
    cli::{Commands, SnapshotCmd, VolleyCli},
    commands::{self, snapshot::handle_snapshot_import, CommandContext},
    config::BackendConfig,
    queries::LeagueQueries,
};

fn log_level(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = VolleyCli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(app.verbose, app.quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Commands::Snapshot {
        cmd: SnapshotCmd::Import { file, path },
    } = app.command
    {
        handle_snapshot_import(&file, path)
            .with_context(|| format!("importing {}", file.display()))?;
        return Ok(());
    }

    let config = BackendConfig::from_env(&app.backend).context("no league backend configured")?;
    let backend = config.connect().context("connecting to the league backend")?;
    let ctx = CommandContext::new(LeagueQueries::new(backend), app.json);

    commands::run(&ctx, app.command).await?;
    Ok(())
}
