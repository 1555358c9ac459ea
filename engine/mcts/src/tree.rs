//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for node storage. Nodes are stored in a
//! contiguous Vec and referenced by NodeId indices; the parent link is just
//! an index, so the whole tree is released when the arena is dropped.

use engine_core::{BoardGame, Place, Side};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<B> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<B>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<B: BoardGame> MctsTree<B> {
    /// Create a new tree whose root holds `board` with `to_move` to play.
    pub fn new(board: B, to_move: Side) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board, to_move)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<B> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<B> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<B>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<B>] {
        &self.nodes
    }

    /// Add a child reached by `place` with the resulting `board`.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, place: Place, board: B) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, place, board));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Expand a node with one child per legal placement among `candidates`,
    /// keeping the candidates' order. Illegal candidates are skipped.
    ///
    /// Returns the number of children added; zero means the node is terminal.
    pub fn expand<I>(&mut self, node_id: NodeId, candidates: I) -> usize
    where
        I: IntoIterator<Item = Place>,
    {
        let mut added = 0;
        for place in candidates {
            let mut after = self.get(node_id).board.clone();
            if place.apply(&mut after).is_ok() {
                self.add_child(node_id, place, after);
                added += 1;
            }
        }
        self.get_mut(node_id).expanded = true;
        added
    }

    /// Select a child of `node_id`.
    ///
    /// The first unvisited child wins outright. Otherwise the child with the
    /// highest UCB1 score is chosen, ties going to the earliest child.
    pub fn select_child(&self, node_id: NodeId, exploration: f32, perspective: Side) -> Option<NodeId> {
        let node = self.get(node_id);

        if let Some(&unvisited) = node.children.iter().find(|&&id| self.get(id).visit_count == 0) {
            return Some(unvisited);
        }

        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visit_count as f32).ln();
        let mut best: Option<NodeId> = None;
        let mut best_score = f32::NEG_INFINITY;

        for &child_id in &node.children {
            let score = self
                .get(child_id)
                .ucb_score(parent_visits_ln, exploration, node.to_move, perspective);
            if best.is_none() || score > best_score {
                best = Some(child_id);
                best_score = score;
            }
        }

        best
    }

    /// Descend from the root with `select_child` until reaching a node with
    /// no children.
    pub fn select_leaf(&self, exploration: f32, perspective: Side) -> NodeId {
        let mut current = self.root;
        while let Some(child_id) = self.select_child(current, exploration, perspective) {
            current = child_id;
        }
        current
    }

    /// Backpropagate a rollout outcome from a node to the root.
    /// Every node on the path gains a visit, and a win when `win` is true.
    pub fn backpropagate(&mut self, leaf_id: NodeId, win: bool) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.win_count += u32::from(win);
            current_id = node.parent;
        }
    }

    /// Get the root child with the highest empirical win rate.
    ///
    /// The first child is the initial candidate whatever its visits; after
    /// that, unvisited children are skipped and only a strictly higher win
    /// rate replaces the candidate. Returns None if the root has no children.
    pub fn best_action(&self) -> Option<Place> {
        let root = self.get(self.root);
        let (&first, rest) = root.children.split_first()?;

        let mut best = self.get(first);
        let mut best_rate = best.win_rate();

        for &child_id in rest {
            let child = self.get(child_id);
            if child.visit_count == 0 {
                continue;
            }
            let rate = child.win_rate();
            if rate > best_rate {
                best = child;
                best_rate = rate;
            }
        }

        best.place
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_wins: root.win_count,
            root_win_rate: root.win_rate(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_wins: u32,
    pub root_win_rate: f32,
    pub max_depth: u32,
}
