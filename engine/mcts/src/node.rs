//! MCTS tree node representation.
//!
//! Each node holds a snapshot of the board reached by applying its placement
//! to the parent's board. Statistics are always counted from the searching
//! agent's perspective.

use engine_core::{Place, Side};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<B> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Placement that led here from the parent (None for root)
    pub place: Option<Place>,

    /// Board snapshot at this node
    pub board: B,

    /// Side to move on `board`
    pub to_move: Side,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Simulations through this node that the searching agent won.
    /// Never exceeds `visit_count`.
    pub win_count: u32,

    /// Children in expansion order. Empty until expanded.
    pub children: Vec<NodeId>,

    /// Whether expansion has already run on this node
    pub expanded: bool,
}

impl<B> MctsNode<B> {
    /// Create a new root node.
    pub fn new_root(board: B, to_move: Side) -> Self {
        Self {
            parent: NodeId::NONE,
            place: None,
            board,
            to_move,
            visit_count: 0,
            win_count: 0,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Create a new child node. The side to move flips relative to the mover.
    pub fn new_child(parent: NodeId, place: Place, board: B) -> Self {
        Self {
            parent,
            place: Some(place),
            board,
            to_move: place.who.opponent(),
            visit_count: 0,
            win_count: 0,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Empirical win rate `win_count / visit_count`.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_count as f32 / self.visit_count as f32
        }
    }

    /// UCB1 score for selecting this node as a child.
    /// UCB(s,a) = W/N + c * sqrt(ln(N_parent) / N)
    ///
    /// `chooser` is the side making the choice at the parent. When it is not
    /// the searching agent (`perspective`), the exploitation term is the
    /// agent's loss rate instead.
    ///
    /// Takes pre-computed ln(parent_visits) so callers comparing several
    /// children compute it once. Unvisited nodes score +inf.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f32, exploration: f32, chooser: Side, perspective: Side) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let exploit = if chooser == perspective {
            self.win_rate()
        } else {
            1.0 - self.win_rate()
        };
        let explore = exploration * (parent_visits_ln / self.visit_count as f32).sqrt();
        exploit + explore
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this is a leaf node (no children).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Expanded but produced no children: the side to move has lost.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.expanded && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root((), Side::White);

        assert!(node.parent.is_none());
        assert!(node.place.is_none());
        assert_eq!(node.to_move, Side::White);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.win_count, 0);
        assert!(node.children.is_empty());
        assert!(!node.expanded);
    }

    #[test]
    fn test_new_child_flips_side() {
        let place = Place::new(3, Side::Black);
        let node = MctsNode::new_child(NodeId(0), place, ());

        assert_eq!(node.parent, NodeId(0));
        assert_eq!(node.place, Some(place));
        assert_eq!(node.to_move, Side::White);
    }

    #[test]
    fn test_win_rate() {
        let mut node = MctsNode::new_root((), Side::Black);

        // Unvisited
        assert!(node.win_rate().abs() < 1e-6);

        node.visit_count = 4;
        node.win_count = 3;
        assert!((node.win_rate() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = MctsNode::new_root((), Side::White);
        node.visit_count = 10;
        node.win_count = 5;

        let parent_visits_ln = (100f32).ln();
        let c = std::f32::consts::SQRT_2;

        // 0.5 + sqrt(2) * sqrt(ln(100) / 10) = 0.5 + sqrt(2 * 4.605 / 10) ~= 1.4597
        let ucb = node.ucb_score(parent_visits_ln, c, Side::Black, Side::Black);
        assert!((ucb - 1.4597).abs() < 1e-3);

        // Same exploration bonus, exploitation from the opponent's side
        node.win_count = 8;
        let own = node.ucb_score(parent_visits_ln, c, Side::Black, Side::Black);
        let theirs = node.ucb_score(parent_visits_ln, c, Side::White, Side::Black);
        assert!(((own - theirs) - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_unvisited_scores_infinite() {
        let node = MctsNode::new_root((), Side::Black);
        assert_eq!(node.ucb_score(0.0, 1.0, Side::Black, Side::Black), f32::INFINITY);
    }

    #[test]
    fn test_is_leaf_and_terminal() {
        let mut node = MctsNode::new_root((), Side::Black);
        assert!(node.is_leaf());
        assert!(!node.is_terminal());

        node.expanded = true;
        assert!(node.is_terminal());

        node.children.push(NodeId(1));
        assert!(!node.is_leaf());
        assert!(node.is_expanded());
        assert!(!node.is_terminal());
    }
}
