//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for nogo.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "nogo.toml",    // Current directory
    "../nogo.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from nogo.toml.
///
/// Searches for nogo.toml in the following order:
/// 1. Path specified by NOGO_CONFIG environment variable
/// 2. Current directory (nogo.toml)
/// 3. Parent directory (../nogo.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("NOGO_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from NOGO_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!("NOGO_CONFIG={} not found, searching defaults", path.display());
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No nogo.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: NOGO_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "NOGO_COMMON_LOG_LEVEL");

    // Arena
    env_override!(config, arena.games, "NOGO_ARENA_GAMES", parse);
    env_override!(config, arena.black, "NOGO_ARENA_BLACK");
    env_override!(config, arena.white, "NOGO_ARENA_WHITE");

    // MCTS
    env_override!(
        config,
        mcts.num_simulations,
        "NOGO_MCTS_NUM_SIMULATIONS",
        parse
    );
    env_override!(config, mcts.exploration, "NOGO_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.expansion, "NOGO_MCTS_EXPANSION");

    config
}
