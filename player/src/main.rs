//! Player - NoGo match runner
//!
//! Builds a black and a white agent from their argument strings, plays the
//! configured number of games between them and reports the result:
//! 1. Uniform-random agents place on a random legal cell
//! 2. `search=MCTS` agents run a Monte Carlo tree search for every move
//! 3. The side that cannot make a legal placement loses

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod agent;
mod arena;
mod config;
mod player;

use crate::config::Config;
use crate::player::Player;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let defaults = config.mcts_defaults();
    let mut black = Player::with_defaults(&config.black, &defaults)?;
    let mut white = Player::with_defaults(&config.white, &defaults)?;

    info!(
        games = config.games,
        black = black.name(),
        white = white.name(),
        "Starting match"
    );

    let tally = arena::run(config.games, &mut black, &mut white)?;

    info!(
        games = tally.games(),
        black_wins = tally.black,
        white_wins = tally.white,
        "Match complete"
    );

    Ok(())
}
