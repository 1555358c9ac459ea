//! Match runner: plays full games between a black and a white agent.

use anyhow::{bail, Result};
use engine_core::{BoardGame, Place, Side};
use games_nogo::Board;
use tracing::{debug, info};

use crate::player::Player;

/// Outcome of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Placements in the order they were played
    pub moves: Vec<Place>,
    /// Side that could not make a legal placement
    pub loser: Side,
}

impl GameRecord {
    pub fn winner(&self) -> Side {
        self.loser.opponent()
    }
}

/// Win counts over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub black: u32,
    pub white: u32,
}

impl Tally {
    pub fn record(&mut self, winner: Side) {
        match winner {
            Side::Black => self.black += 1,
            Side::White => self.white += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.black + self.white
    }
}

/// Play one game from the empty board.
///
/// Agents alternate starting with black. A side whose agent returns no
/// placement, or one the board rejects, loses.
pub fn play_game(black: &mut Player, white: &mut Player) -> GameRecord {
    let mut board = Board::new();
    let mut moves = Vec::new();

    loop {
        let side = board.side_to_move();
        let agent = match side {
            Side::Black => &mut *black,
            Side::White => &mut *white,
        };

        let Some(place) = agent.take_action(&board) else {
            debug!(side = %side, plies = moves.len(), "no legal placement");
            break;
        };
        if let Err(e) = board.place(place) {
            debug!(side = %side, %place, error = %e, "agent chose an illegal placement");
            break;
        }
        debug!(%place, "placed");
        moves.push(place);
    }

    GameRecord {
        moves,
        loser: board.side_to_move(),
    }
}

/// Play `games` games and return the win counts.
///
/// Both agents must hold the role matching their seat.
pub fn run(games: u32, black: &mut Player, white: &mut Player) -> Result<Tally> {
    if black.role() != Side::Black.as_str() {
        bail!("black seat holds agent with role '{}'", black.role());
    }
    if white.role() != Side::White.as_str() {
        bail!("white seat holds agent with role '{}'", white.role());
    }

    let black_name = black.name().to_string();
    let white_name = white.name().to_string();
    black.notify(&format!("opponent={}", white_name));
    white.notify(&format!("opponent={}", black_name));

    let mut tally = Tally::default();
    for game in 1..=games {
        let flag = format!("game={}", game);
        black.open_episode(&flag);
        white.open_episode(&flag);

        let record = play_game(black, white);
        let winner = record.winner();
        tally.record(winner);

        black.close_episode(&flag);
        white.close_episode(&flag);

        let winner_name = match winner {
            Side::Black => &black_name,
            Side::White => &white_name,
        };
        info!(
            game,
            plies = record.moves.len(),
            winner = %winner,
            agent = %winner_name,
            "game finished"
        );
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(record: &GameRecord) -> Board {
        let mut board = Board::new();
        for place in &record.moves {
            board.place(*place).expect("recorded placement replays legally");
        }
        board
    }

    #[test]
    fn test_random_game_runs_to_completion() {
        let mut black = Player::new("name=b role=black seed=1").unwrap();
        let mut white = Player::new("name=w role=white seed=2").unwrap();
        let record = play_game(&mut black, &mut white);

        assert!(!record.moves.is_empty());
        for (i, place) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Side::Black } else { Side::White };
            assert_eq!(place.who, expected);
        }

        let board = replay(&record);
        assert!(board.is_terminal());
        assert_eq!(board.side_to_move(), record.loser);
        assert_eq!(record.winner(), record.loser.opponent());
    }

    #[test]
    fn test_seeded_games_repeat() {
        let play = || {
            let mut black = Player::new("role=black seed=5").unwrap();
            let mut white = Player::new("role=white seed=6").unwrap();
            play_game(&mut black, &mut white).moves
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_mcts_against_random() {
        let mut black = Player::new("name=m role=black search=MCTS seed=3 simulations=10").unwrap();
        let mut white = Player::new("name=r role=white seed=4").unwrap();
        let record = play_game(&mut black, &mut white);
        assert!(replay(&record).is_terminal());
    }

    #[test]
    fn test_run_tallies_every_game() {
        let mut black = Player::new("name=b role=black seed=8").unwrap();
        let mut white = Player::new("name=w role=white seed=9").unwrap();
        let tally = run(3, &mut black, &mut white).unwrap();

        assert_eq!(tally.games(), 3);
        assert_eq!(black.property("opponent"), Some("w"));
        assert_eq!(white.property("opponent"), Some("b"));
    }

    #[test]
    fn test_run_rejects_swapped_roles() {
        let mut black = Player::new("role=white seed=1").unwrap();
        let mut white = Player::new("role=black seed=2").unwrap();
        assert!(run(1, &mut black, &mut white).is_err());
    }

    #[test]
    fn test_tally_record() {
        let mut tally = Tally::default();
        tally.record(Side::White);
        tally.record(Side::White);
        tally.record(Side::Black);
        assert_eq!(tally, Tally { black: 1, white: 2 });
    }
}
