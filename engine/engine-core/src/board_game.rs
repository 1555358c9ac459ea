//! Rules-engine contract consumed by the agents.

use crate::action::Place;

/// Why a placement was rejected by the rules engine.
///
/// During a rollout an illegal placement is an end-of-game signal, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("it is not this side's turn")]
    OutOfTurn,

    #[error("position {0} is off the board")]
    OutOfBounds(u16),

    #[error("position {0} is already occupied")]
    Occupied(u16),

    #[error("placement would capture a group")]
    Capture,

    #[error("placement would be suicide")]
    Suicide,
}

/// A two-player placement game whose board can be snapshotted by `Clone`.
///
/// The search only needs `CELLS` to enumerate candidate placements and
/// `place` to try them. Legality is owned entirely by the implementation.
pub trait BoardGame: Clone + std::fmt::Debug {
    /// Number of cells. Placements are indexed `0..CELLS`.
    const CELLS: usize;

    /// Try to apply `place`. On `Err` the board must be unchanged.
    fn place(&mut self, place: Place) -> Result<(), IllegalMove>;

    /// Whether `place` would be accepted, without modifying `self`.
    fn is_legal(&self, place: Place) -> bool {
        self.clone().place(place).is_ok()
    }

    /// Legal placements for `who`, in cell order.
    fn legal_placements(&self, who: crate::side::Side) -> Vec<Place> {
        Place::all::<Self>(who)
            .into_iter()
            .filter(|p| self.is_legal(*p))
            .collect()
    }
}
