//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_black() -> String {
    defaults::black().into()
}
fn d_white() -> String {
    defaults::white().into()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_expansion() -> String {
    defaults::expansion().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching nogo.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Match settings for the arena binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of games to play
    #[serde(default = "d_games")]
    pub games: u32,
    /// Agent argument string for the black player
    #[serde(default = "d_black")]
    pub black: String,
    /// Agent argument string for the white player
    #[serde(default = "d_white")]
    pub white: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            black: defaults::black().into(),
            white: defaults::white().into(),
        }
    }
}

/// Search defaults for MCTS agents that do not set them in their arguments
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// "flat" or "recursive"
    #[serde(default = "d_expansion")]
    pub expansion: String,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            exploration: defaults::exploration(),
            expansion: defaults::expansion().into(),
        }
    }
}
