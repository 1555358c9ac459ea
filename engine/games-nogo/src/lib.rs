//! NoGo game implementation
//!
//! NoGo is played on a Go board with the capture rule inverted: a placement
//! is illegal if it would capture any opponent group, and also illegal if it
//! would leave its own group without liberties. The first side unable to
//! place a stone loses. Black moves first.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{BoardGame, Place, Side};
//! use games_nogo::Board;
//!
//! let mut board = Board::new();
//! board.place(Place::new(40, Side::Black)).unwrap();
//! assert_eq!(board.side_to_move(), Side::White);
//! ```

use std::fmt;

use engine_core::{BoardGame, IllegalMove, Place, Side};

/// Board width.
pub const SIZE_X: usize = 9;
/// Board height.
pub const SIZE_Y: usize = 9;
/// Number of cells on the board.
pub const CELLS: usize = SIZE_X * SIZE_Y;

/// NoGo board state
///
/// Holds the stones, the side to move and the number of stones placed.
/// Copying a `Board` is a plain memcpy, so search nodes snapshot it freely.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells, `None` = empty
    cells: [Option<Side>; CELLS],
    to_move: Side,
    moves_played: u32,
}

impl Board {
    /// Create an empty board with black to move.
    pub fn new() -> Self {
        Self {
            cells: [None; CELLS],
            to_move: Side::Black,
            moves_played: 0,
        }
    }

    /// Parse a board from a 9x9 layout of `.` (empty), `X` (black) and `O` (white).
    ///
    /// Whitespace is ignored, so rows may be written on separate lines.
    /// The layout is taken as-is; no legality check is performed on the stones.
    pub fn from_layout(layout: &str, to_move: Side) -> Result<Self, LayoutError> {
        let mut cells = [None; CELLS];
        let mut count = 0usize;
        let mut stones = 0u32;

        for ch in layout.chars().filter(|c| !c.is_whitespace()) {
            if count >= CELLS {
                return Err(LayoutError::WrongSize(count + 1));
            }
            cells[count] = match ch {
                '.' => None,
                'X' | 'x' => Some(Side::Black),
                'O' | 'o' => Some(Side::White),
                other => return Err(LayoutError::UnknownSymbol(other)),
            };
            if cells[count].is_some() {
                stones += 1;
            }
            count += 1;
        }

        if count != CELLS {
            return Err(LayoutError::WrongSize(count));
        }

        Ok(Self {
            cells,
            to_move,
            moves_played: stones,
        })
    }

    /// Side whose placement the board will accept next.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.to_move
    }

    /// Number of stones placed so far.
    #[inline]
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Stone on `position`, if any.
    pub fn stone_at(&self, position: usize) -> Option<Side> {
        self.cells.get(position).copied().flatten()
    }

    /// True when the side to move has no legal placement (and so has lost).
    pub fn is_terminal(&self) -> bool {
        (0..CELLS as u16).all(|pos| !self.is_legal(Place::new(pos, self.to_move)))
    }

    /// Orthogonal neighbours of `pos`.
    fn neighbors(pos: usize) -> impl Iterator<Item = usize> {
        let x = pos % SIZE_X;
        let y = pos / SIZE_X;
        let up = (y > 0).then(|| pos - SIZE_X);
        let down = (y + 1 < SIZE_Y).then(|| pos + SIZE_X);
        let left = (x > 0).then(|| pos - 1);
        let right = (x + 1 < SIZE_X).then(|| pos + 1);
        [up, down, left, right].into_iter().flatten()
    }

    /// Whether the group containing the stone at `start` touches an empty cell.
    fn has_liberty(&self, start: usize) -> bool {
        let Some(color) = self.cells[start] else {
            return true;
        };

        let mut visited = [false; CELLS];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(pos) = stack.pop() {
            for next in Self::neighbors(pos) {
                match self.cells[next] {
                    None => return true,
                    Some(c) if c == color && !visited[next] => {
                        visited[next] = true;
                        stack.push(next);
                    }
                    _ => {}
                }
            }
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGame for Board {
    const CELLS: usize = CELLS;

    fn place(&mut self, place: Place) -> Result<(), IllegalMove> {
        if place.who != self.to_move {
            return Err(IllegalMove::OutOfTurn);
        }
        let pos = place.position as usize;
        if pos >= CELLS {
            return Err(IllegalMove::OutOfBounds(place.position));
        }
        if self.cells[pos].is_some() {
            return Err(IllegalMove::Occupied(place.position));
        }

        self.cells[pos] = Some(place.who);

        let opponent = place.who.opponent();
        let captures = Self::neighbors(pos)
            .any(|n| self.cells[n] == Some(opponent) && !self.has_liberty(n));
        if captures {
            self.cells[pos] = None;
            return Err(IllegalMove::Capture);
        }

        if !self.has_liberty(pos) {
            self.cells[pos] = None;
            return Err(IllegalMove::Suicide);
        }

        self.to_move = opponent;
        self.moves_played += 1;
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE_X) {
            for cell in row {
                let ch = match cell {
                    None => '.',
                    Some(Side::Black) => 'X',
                    Some(Side::White) => 'O',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("to_move", &self.to_move)
            .field("moves_played", &self.moves_played)
            .field("cells", &format_args!("\n{}", self))
            .finish()
    }
}

/// Error parsing a textual board layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has {0} cells, expected 81")]
    WrongSize(usize),
    #[error("unknown symbol {0:?} in layout")]
    UnknownSymbol(char),
}
