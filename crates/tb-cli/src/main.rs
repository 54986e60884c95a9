use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tb_cli::commands::{clusters, compare, generate, segment};
use tb_cli::input::load_games;
use tb_cli::{Cli, Commands, Config};
use tb_core::{Comparer, Game, group_games};

/// Load config, letting `--catalog` override the configured catalog path.
fn load_config(config_path: Option<&Path>, catalog: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_from(config_path).context("failed to load configuration")?;
    if let Some(catalog) = catalog {
        config.catalog_path = catalog.to_path_buf();
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn games(config: &Config, events: &Path) -> Result<Vec<Game>> {
    load_games(&config.catalog_path, events)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(cli.config.as_deref(), cli.catalog.as_deref())?;
    let comparer = Comparer::new(config.comparer());
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Segment {
            events,
            game,
            subject,
            window,
        } => {
            let games = games(&config, events)?;
            let window = window.unwrap_or(config.window_seconds);
            segment::run(&mut out, &games, *game, *subject, window)?;
        }
        Commands::Compare {
            events,
            games: game_ids,
            subject,
        } => {
            let games = games(&config, events)?;
            compare::run(&mut out, &games, game_ids, *subject, &comparer)?;
        }
        Commands::Clusters { events, json } => {
            let groups = group_games(games(&config, events)?, config.min_games);
            clusters::run(
                &mut out,
                &groups,
                &config.dbscan(),
                &comparer,
                config.min_games,
                *json,
            )?;
        }
        Commands::Generate { events, title } => {
            let groups = group_games(games(&config, events)?, config.min_games);
            generate::run(&mut out, &groups, title, &config.dbscan(), &comparer)?;
        }
    }

    out.flush()?;
    Ok(())
}
