//! Agents that choose NoGo placements.
//!
//! `search=MCTS` builds a Monte Carlo tree search agent; without `search`
//! the agent places uniformly at random among its legal moves.

use engine_config::MctsConfig as MctsSettings;
use engine_core::{Place, Side};
use games_nogo::Board;
use mcts::{Expansion, MctsConfig, MctsSearch, RandomPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::agent::{AgentError, AgentMeta};

fn rng_from(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Uniform-random agent.
#[derive(Debug)]
pub struct RandomPlayer {
    meta: AgentMeta,
    policy: RandomPolicy<Board>,
}

impl RandomPlayer {
    fn new(meta: AgentMeta, who: Side, seed: Option<u64>) -> Self {
        Self {
            meta,
            policy: RandomPolicy::new(who, rng_from(seed)),
        }
    }

    pub fn take_action(&mut self, board: &Board) -> Option<Place> {
        self.policy.select_action(board)
    }
}

/// Agent running one flat MCTS search per decision.
#[derive(Debug)]
pub struct MctsPlayer {
    meta: AgentMeta,
    who: Side,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl MctsPlayer {
    fn new(
        meta: AgentMeta,
        who: Side,
        seed: Option<u64>,
        defaults: &MctsSettings,
    ) -> Result<Self, AgentError> {
        let config = Self::search_config(&meta, defaults)?;
        config.validate()?;
        debug!(
            agent = meta.name(),
            simulations = config.num_simulations,
            exploration = config.exploration,
            expansion = %config.expansion,
            "MCTS agent ready"
        );
        Ok(Self {
            meta,
            who,
            config,
            rng: rng_from(seed),
        })
    }

    /// Search settings from the agent arguments, falling back to `defaults`.
    fn search_config(meta: &AgentMeta, defaults: &MctsSettings) -> Result<MctsConfig, AgentError> {
        let simulations = match meta.parse_value::<u32>("simulations")? {
            Some(n) => n,
            None => meta
                .parse_value::<u32>("simulation")?
                .unwrap_or(defaults.num_simulations),
        };
        let exploration = meta
            .parse_value::<f32>("exploration")?
            .unwrap_or(defaults.exploration as f32);
        let expansion = match meta.parse_value::<Expansion>("expansion")? {
            Some(expansion) => expansion,
            None => defaults.expansion.parse()?,
        };

        Ok(MctsConfig::default()
            .with_simulations(simulations)
            .with_exploration(exploration)
            .with_expansion(expansion))
    }

    #[cfg(test)]
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn take_action(&mut self, board: &Board) -> Option<Place> {
        match MctsSearch::new(*board, self.who, self.config.clone()) {
            Ok(mut search) => search.run(&mut self.rng).action,
            Err(e) => {
                warn!(agent = self.meta.name(), error = %e, "search rejected its config");
                None
            }
        }
    }
}

/// An agent of either kind.
#[derive(Debug)]
pub enum Player {
    Random(RandomPlayer),
    Mcts(MctsPlayer),
}

impl Player {
    /// Build an agent from its argument string with the compiled-in search
    /// defaults.
    #[allow(dead_code)]
    pub fn new(args: &str) -> Result<Self, AgentError> {
        Self::with_defaults(args, &MctsSettings::default())
    }

    /// Build an agent from its argument string. MCTS agents take any search
    /// setting missing from `args` from `defaults`.
    pub fn with_defaults(args: &str, defaults: &MctsSettings) -> Result<Self, AgentError> {
        let meta = AgentMeta::parse(args);
        let seed = meta.seed()?;
        meta.validate_name()?;
        let who = meta.side()?;

        let search = meta.property("search").map(str::to_string);
        match search.as_deref() {
            None => Ok(Player::Random(RandomPlayer::new(meta, who, seed))),
            Some(s) if s.eq_ignore_ascii_case("mcts") => {
                Ok(Player::Mcts(MctsPlayer::new(meta, who, seed, defaults)?))
            }
            Some(other) => Err(AgentError::UnknownSearch(other.to_string())),
        }
    }

    fn meta(&self) -> &AgentMeta {
        match self {
            Player::Random(p) => &p.meta,
            Player::Mcts(p) => &p.meta,
        }
    }

    /// Choose a placement for `board`, or None when there is none.
    pub fn take_action(&mut self, board: &Board) -> Option<Place> {
        match self {
            Player::Random(p) => p.take_action(board),
            Player::Mcts(p) => p.take_action(board),
        }
    }

    #[allow(dead_code)]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta().property(key)
    }

    pub fn notify(&mut self, msg: &str) {
        match self {
            Player::Random(p) => p.meta.notify(msg),
            Player::Mcts(p) => p.meta.notify(msg),
        }
    }

    pub fn name(&self) -> &str {
        self.meta().name()
    }

    pub fn role(&self) -> &str {
        self.meta().role()
    }

    pub fn open_episode(&mut self, flag: &str) {
        debug!(agent = self.name(), flag, "episode opened");
    }

    pub fn close_episode(&mut self, flag: &str) {
        debug!(agent = self.name(), flag, "episode closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::BoardGame;

    /// Black to move with a single legal placement at cell 2; cell 1 would
    /// capture the white stone in the corner.
    fn one_move_board() -> Board {
        let layout = format!("O..XXXXXX{}", "XXXXXXXXX".repeat(8));
        Board::from_layout(&layout, Side::Black).unwrap()
    }

    /// Black to move with no legal placement.
    fn full_board() -> Board {
        let layout = format!("{}.", "X".repeat(80));
        Board::from_layout(&layout, Side::Black).unwrap()
    }

    #[test]
    fn test_dispatch_on_search() {
        assert!(matches!(Player::new("role=black").unwrap(), Player::Random(_)));
        assert!(matches!(Player::new("role=black search=MCTS").unwrap(), Player::Mcts(_)));
        assert!(matches!(Player::new("role=white search=mcts").unwrap(), Player::Mcts(_)));
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(Player::new("role=red"), Err(AgentError::InvalidRole(_))));
        assert!(matches!(Player::new(""), Err(AgentError::InvalidRole(_))));
        assert!(matches!(
            Player::new("name=a:b role=black"),
            Err(AgentError::InvalidName(_))
        ));
        assert!(matches!(
            Player::new("role=black seed=x"),
            Err(AgentError::InvalidValue { .. })
        ));
        assert!(matches!(
            Player::new("role=black search=alphabeta"),
            Err(AgentError::UnknownSearch(_))
        ));
        assert!(matches!(
            Player::new("role=black search=MCTS exploration=-1"),
            Err(AgentError::Search(_))
        ));
        assert!(matches!(
            Player::new("role=black search=MCTS expansion=deep"),
            Err(AgentError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_search_settings_from_args() {
        let Player::Mcts(p) =
            Player::new("role=black search=MCTS simulations=7 exploration=0.5 expansion=recursive")
                .unwrap()
        else {
            panic!("expected an MCTS agent");
        };
        assert_eq!(p.config().num_simulations, 7);
        assert!((p.config().exploration - 0.5).abs() < 1e-6);
        assert_eq!(p.config().expansion, Expansion::Recursive);
    }

    #[test]
    fn test_search_settings_fall_back_to_defaults() {
        let defaults = MctsSettings {
            num_simulations: 33,
            exploration: 1.0,
            expansion: "flat".into(),
        };
        let Player::Mcts(p) = Player::with_defaults("role=white search=MCTS simulation=9", &defaults)
            .unwrap()
        else {
            panic!("expected an MCTS agent");
        };
        assert_eq!(p.config().num_simulations, 9);
        assert!((p.config().exploration - 1.0).abs() < 1e-6);

        let Player::Mcts(p) = Player::with_defaults("role=white search=MCTS", &defaults).unwrap()
        else {
            panic!("expected an MCTS agent");
        };
        assert_eq!(p.config().num_simulations, 33);
        assert_eq!(p.config().expansion, Expansion::Flat);
    }

    #[test]
    fn test_single_legal_move() {
        let board = one_move_board();
        let expected = Some(Place::new(2, Side::Black));
        for args in ["role=black seed=1", "role=black search=MCTS seed=1"] {
            let mut player = Player::new(args).unwrap();
            assert_eq!(player.take_action(&board), expected, "{args}");
        }
    }

    #[test]
    fn test_no_legal_move() {
        let board = full_board();
        for args in ["role=black seed=3", "role=black search=MCTS seed=3"] {
            let mut player = Player::new(args).unwrap();
            assert_eq!(player.take_action(&board), None, "{args}");
        }
    }

    #[test]
    fn test_mcts_move_is_legal_and_reproducible() {
        let board = Board::new();
        let args = "role=black search=MCTS seed=21 simulations=40";
        let mut first = Player::new(args).unwrap();
        let mut second = Player::new(args).unwrap();

        let place = first.take_action(&board).unwrap();
        assert_eq!(place.who, Side::Black);
        assert!(board.is_legal(place));
        assert_eq!(second.take_action(&board), Some(place));
    }

    #[test]
    fn test_notify_and_properties() {
        let mut player = Player::new("name=bot role=white").unwrap();
        assert_eq!(player.name(), "bot");
        assert_eq!(player.role(), "white");
        player.notify("opponent=other");
        assert_eq!(player.property("opponent"), Some("other"));
    }
}
