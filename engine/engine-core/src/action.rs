//! Move representation.

use std::fmt;

use crate::board_game::{BoardGame, IllegalMove};
use crate::side::Side;

/// Placement of a stone for `who` on cell `position`.
///
/// Cells are indexed row-major from 0 to `BoardGame::CELLS - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Place {
    pub position: u16,
    pub who: Side,
}

impl Place {
    pub fn new(position: u16, who: Side) -> Self {
        Self { position, who }
    }

    /// Every placement `who` could attempt on a board of type `B`, in cell order.
    pub fn all<B: BoardGame>(who: Side) -> Vec<Place> {
        (0..B::CELLS as u16).map(|pos| Place::new(pos, who)).collect()
    }

    /// Apply this placement to `board` in place.
    ///
    /// On `Err` the board is left untouched.
    #[inline]
    pub fn apply<B: BoardGame>(&self, board: &mut B) -> Result<(), IllegalMove> {
        board.place(*self)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.who, self.position)
    }
}
