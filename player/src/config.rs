//! Configuration for the player binary
//!
//! Configuration is loaded from nogo.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then nogo.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig, MctsConfig as MctsSettings};
use mcts::Expansion;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_black() -> String {
    CENTRAL_CONFIG.arena.black.clone()
}

fn default_white() -> String {
    CENTRAL_CONFIG.arena.white.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_expansion() -> String {
    CENTRAL_CONFIG.mcts.expansion.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "player")]
#[command(about = "NoGo arena - plays games between two agents")]
#[command(
    long_about = "Plays a series of 9x9 NoGo games between a black and a white agent.
Each agent is described by whitespace-separated key=value pairs, e.g.
\"name=mcts role=black search=MCTS seed=1 simulations=200\".

Configuration is loaded from nogo.toml with NOGO_* environment variable
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Argument string for the black agent
    #[arg(long, default_value_t = default_black())]
    pub black: String,

    /// Argument string for the white agent
    #[arg(long, default_value_t = default_white())]
    pub white: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// MCTS iterations per decision, unless the agent sets simulations=
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// UCB1 exploration constant, unless the agent sets exploration=
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Tree growth (flat or recursive), unless the agent sets expansion=
    #[arg(long, default_value_t = default_expansion())]
    pub expansion: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.black.trim().is_empty() {
            return Err(anyhow!("black agent arguments cannot be empty"));
        }

        if self.white.trim().is_empty() {
            return Err(anyhow!("white agent arguments cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            ));
        }

        self.expansion.parse::<Expansion>()?;

        Ok(())
    }

    /// Search defaults handed to MCTS agents.
    pub fn mcts_defaults(&self) -> MctsSettings {
        MctsSettings {
            num_simulations: self.num_simulations,
            exploration: self.exploration,
            expansion: self.expansion.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            games: 2,
            black: "name=b role=black search=MCTS".into(),
            white: "name=w role=white".into(),
            log_level: "info".into(),
            num_simulations: 100,
            exploration: std::f64::consts::SQRT_2,
            expansion: "flat".into(),
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_games() {
        let mut cfg = base_config();
        cfg.games = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("games"));
    }

    #[test]
    fn validate_rejects_empty_agent() {
        let mut cfg = base_config();
        cfg.white = "  ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("white"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_bad_search_defaults() {
        let mut cfg = base_config();
        cfg.exploration = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = base_config();
        cfg.expansion = "deep".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("expansion"));
    }

    #[test]
    fn mcts_defaults_copies_search_settings() {
        let mut cfg = base_config();
        cfg.num_simulations = 12;
        cfg.expansion = "recursive".into();
        let defaults = cfg.mcts_defaults();
        assert_eq!(defaults.num_simulations, 12);
        assert_eq!(defaults.expansion, "recursive");
    }

    #[test]
    fn parses_cli_flags() {
        let cfg = Config::parse_from([
            "player",
            "--games",
            "4",
            "--black",
            "role=black seed=1",
            "--expansion",
            "recursive",
        ]);
        assert_eq!(cfg.games, 4);
        assert_eq!(cfg.black, "role=black seed=1");
        assert_eq!(cfg.expansion, "recursive");
    }
}
