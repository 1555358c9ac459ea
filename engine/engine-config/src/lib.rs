//! Centralized configuration loading from nogo.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! by the arena binary and the agents it builds.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`NOGO_<SECTION>_<KEY>`)
//! 2. nogo.toml file
//! 3. Built-in defaults (config.defaults.toml, compiled in)
//!
//! Command-line flags of the binary sit on top of all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! NOGO_<SECTION>_<KEY>=value
//!
//! Examples:
//!     NOGO_COMMON_LOG_LEVEL=debug
//!     NOGO_ARENA_GAMES=50
//!     NOGO_ARENA_BLACK="name=mcts role=black search=MCTS seed=7"
//!     NOGO_MCTS_NUM_SIMULATIONS=400
//!     NOGO_MCTS_EXPANSION=recursive
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
