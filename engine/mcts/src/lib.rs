//! Monte Carlo Tree Search (MCTS) decision core for NoGo-family games.
//!
//! This crate provides a game-agnostic MCTS that works with any board
//! implementing the `engine-core` `BoardGame` trait. Positions are valued by
//! uniformly random rollouts rather than an evaluation function.
//!
//! # Overview
//!
//! One decision runs these phases:
//!
//! 1. **Expansion**: The root gets one child per legal placement, in an order
//!    shuffled by the agent's random source
//! 2. **Selection**: Descend with UCB1; unvisited children always go first
//! 3. **Simulation**: Play a random game from the selected node's board; the
//!    side that cannot place loses
//! 4. **Backpropagation**: Add a visit (and a win, if the searching side won)
//!    to every node from the selected one up to the root
//!
//! Phases 2-4 repeat for a fixed number of iterations. The root child with
//! the highest win rate is returned.
//!
//! By default only the root is ever expanded (flat MCTS). Setting
//! [`Expansion::Recursive`] grows the tree below already visited leaves.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Side;
//! use games_nogo::Board;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = MctsConfig::default().with_simulations(50);
//!
//! let result = run_mcts(&board, Side::Black, config, &mut rng).unwrap();
//! println!("Best placement: {:?}", result.action);
//! ```
//!
//! # Randomness
//!
//! All randomness comes from the `ChaCha20Rng` passed to the search. Each
//! rollout seeds its two per-side policies from that generator, so a fixed
//! seed reproduces a decision exactly.

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{Expansion, MctsConfig};
pub use node::{MctsNode, NodeId};
pub use rollout::{play_out, RandomPolicy};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
