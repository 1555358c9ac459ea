//! MCTS search implementation.
//!
//! Implements one decision:
//! 1. Expansion: the root gets one child per legal placement, in shuffled order
//! 2. Selection: descend with UCB1 (unvisited children first) to a leaf
//! 3. Simulation: random rollout from the leaf's board
//! 4. Backpropagation: update visit/win counts from the leaf to the root
//!
//! Steps 2-4 repeat for the configured number of simulations, then the root
//! child with the best win rate is returned.

use engine_core::{BoardGame, Place, Side};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{Expansion, MctsConfig};
use crate::node::NodeId;
use crate::rollout::play_out;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best placement, or None when the side to move has no legal placement
    pub action: Option<Place>,

    /// Win rate of the chosen child (0.0 when nothing was searched)
    pub win_rate: f32,

    /// Number of simulations performed
    pub simulations: u32,

    /// Nodes allocated during the search
    pub tree_nodes: usize,
}

/// MCTS search state for one decision.
///
/// Owns its tree; dropping the search releases every node.
pub struct MctsSearch<B> {
    tree: MctsTree<B>,
    config: MctsConfig,
    /// Side the search is choosing a move for
    perspective: Side,
}

impl<B: BoardGame> MctsSearch<B> {
    /// Create a new MCTS search for `who` to move on `board`.
    pub fn new(board: B, who: Side, config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            tree: MctsTree::new(board, who),
            config,
            perspective: who,
        })
    }

    /// Run the MCTS search for the configured number of simulations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> SearchResult {
        let root_id = self.tree.root();

        if !self.tree.get(root_id).expanded {
            self.expand_node(root_id, rng);
        }

        if self.tree.get(root_id).is_leaf() {
            debug!(side = %self.perspective, "no legal placement, skipping search");
            return SearchResult {
                action: None,
                win_rate: 0.0,
                simulations: 0,
                tree_nodes: self.tree.len(),
            };
        }

        for _ in 0..self.config.num_simulations {
            self.simulate(rng);
        }

        let action = self.tree.best_action();
        let win_rate = self.child_win_rate(action);
        let stats = self.tree.stats();

        debug!(
            side = %self.perspective,
            action = ?action,
            win_rate,
            root_visits = stats.root_visits,
            root_win_rate = stats.root_win_rate,
            nodes = stats.total_nodes,
            depth = stats.max_depth,
            "MCTS decision"
        );

        SearchResult {
            action,
            win_rate,
            simulations: stats.root_visits,
            tree_nodes: stats.total_nodes,
        }
    }

    /// Run a single simulation (select -> simulate -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        let mut leaf_id = self.tree.select_leaf(self.config.exploration, self.perspective);

        if self.config.expansion == Expansion::Recursive {
            leaf_id = self.grow(leaf_id, rng);
        }

        let leaf = self.tree.get(leaf_id);
        let win = play_out(&leaf.board, leaf.to_move, self.perspective, rng);
        self.tree.backpropagate(leaf_id, win);

        trace!(leaf = leaf_id.0, win, "MCTS simulation complete");
    }

    /// Expand an already visited leaf and step into its first child.
    /// Returns the node to simulate from.
    fn grow(&mut self, leaf_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let leaf = self.tree.get(leaf_id);
        if leaf.visit_count == 0 || leaf.expanded {
            return leaf_id;
        }

        if self.expand_node(leaf_id, rng) == 0 {
            return leaf_id;
        }
        self.tree.get(leaf_id).children[0]
    }

    /// Expand a node with every legal placement for its side to move,
    /// visiting the cells in an order shuffled by `rng`.
    fn expand_node(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> usize {
        let to_move = self.tree.get(node_id).to_move;
        let mut candidates = Place::all::<B>(to_move);
        candidates.shuffle(rng);
        self.tree.expand(node_id, candidates)
    }

    fn child_win_rate(&self, action: Option<Place>) -> f32 {
        let root = self.tree.get(self.tree.root());
        root.children
            .iter()
            .map(|id| self.tree.get(*id))
            .find(|child| child.place == action)
            .map(|child| child.win_rate())
            .unwrap_or(0.0)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<B> {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<B: BoardGame>(
    board: &B,
    who: Side,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(board.clone(), who, config)?;
    Ok(search.run(rng))
}
