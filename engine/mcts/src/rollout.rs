//! Uniform-random rollout policy and full-game simulation.
//!
//! The policy shuffles every cell of the board and plays the first placement
//! the rules engine accepts. It doubles as the standalone random agent and
//! as the move generator inside rollouts.

use std::marker::PhantomData;

use engine_core::{BoardGame, Place, Side};
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

/// Random policy that picks uniformly among the legal placements of one side.
#[derive(Debug, Clone)]
pub struct RandomPolicy<B> {
    who: Side,
    /// Every placement `who` could attempt, reshuffled on each call
    space: Vec<Place>,
    rng: ChaCha20Rng,
    _board: PhantomData<fn() -> B>,
}

impl<B: BoardGame> RandomPolicy<B> {
    pub fn new(who: Side, rng: ChaCha20Rng) -> Self {
        Self {
            who,
            space: Place::all::<B>(who),
            rng,
            _board: PhantomData,
        }
    }

    pub fn with_seed(who: Side, seed: u64) -> Self {
        Self::new(who, ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(who: Side) -> Self {
        Self::new(who, ChaCha20Rng::from_entropy())
    }

    /// Side this policy plays for.
    pub fn who(&self) -> Side {
        self.who
    }

    /// Shuffle the cell list and return the first placement that applies
    /// legally to `board`, or None if there is none.
    pub fn select_action(&mut self, board: &B) -> Option<Place> {
        self.space.shuffle(&mut self.rng);
        self.space.iter().copied().find(|place| board.is_legal(*place))
    }
}

/// Play a uniformly random game from `board` to completion.
///
/// `first_mover` plays first. The game ends when the side to move has no
/// legal placement; that side loses. Returns true iff the side that could
/// not move is the opponent of `perspective`.
///
/// Both per-side policies are seeded from `rng`, so the outcome is fully
/// determined by the caller's generator state.
pub fn play_out<B: BoardGame>(
    board: &B,
    first_mover: Side,
    perspective: Side,
    rng: &mut ChaCha20Rng,
) -> bool {
    let mut own = RandomPolicy::<B>::with_seed(perspective, rng.next_u64());
    let mut other = RandomPolicy::<B>::with_seed(perspective.opponent(), rng.next_u64());

    let mut state = board.clone();
    let mut mover = first_mover;
    let mut plies = 0u32;

    loop {
        let policy = if mover == perspective {
            &mut own
        } else {
            &mut other
        };
        match policy.select_action(&state) {
            Some(place) if place.apply(&mut state).is_ok() => {
                plies += 1;
                mover = mover.opponent();
            }
            _ => break,
        }
    }

    let win = mover != perspective;
    trace!(plies, loser = %mover, win, "rollout finished");
    win
}
