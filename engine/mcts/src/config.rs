//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;

use crate::search::SearchError;

/// How far the tree grows during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Only the root is expanded. Every iteration is a one-ply UCB1 trial
    /// followed by a random rollout.
    #[default]
    Flat,
    /// Leaves that have already been visited are expanded when selected,
    /// growing the tree one ply at a time.
    Recursive,
}

impl FromStr for Expansion {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Expansion::Flat),
            "recursive" => Ok(Expansion::Recursive),
            other => Err(SearchError::InvalidConfig(format!(
                "unknown expansion mode '{}', expected flat or recursive",
                other
            ))),
        }
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expansion::Flat => f.write_str("flat"),
            Expansion::Recursive => f.write_str("recursive"),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/simulate/backpropagate iterations per decision.
    pub num_simulations: u32,

    /// Exploration constant `c` in the UCB1 formula
    /// `W/N + c * sqrt(ln(N_parent) / N)`. Classic UCB1 uses sqrt(2).
    pub exploration: f32,

    /// Tree growth policy.
    pub expansion: Expansion,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            exploration: std::f32::consts::SQRT_2,
            expansion: Expansion::Flat,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 20,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the expansion mode.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 100);
        assert!((config.exploration - 1.41421).abs() < 1e-4);
        assert_eq!(config.expansion, Expansion::Flat);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(250)
            .with_exploration(0.7)
            .with_expansion(Expansion::Recursive);

        assert_eq!(config.num_simulations, 250);
        assert!((config.exploration - 0.7).abs() < 1e-6);
        assert_eq!(config.expansion, Expansion::Recursive);
    }

    #[test]
    fn test_validate_rejects_bad_exploration() {
        assert!(MctsConfig::default().with_exploration(-1.0).validate().is_err());
        assert!(MctsConfig::default().with_exploration(f32::NAN).validate().is_err());
        assert!(MctsConfig::default().with_exploration(f32::INFINITY).validate().is_err());
        // Zero means pure exploitation, which is allowed
        assert!(MctsConfig::default().with_exploration(0.0).validate().is_ok());
    }

    #[test]
    fn test_parse_expansion() {
        assert_eq!("flat".parse::<Expansion>().unwrap(), Expansion::Flat);
        assert_eq!("Recursive".parse::<Expansion>().unwrap(), Expansion::Recursive);
        assert!("deep".parse::<Expansion>().is_err());
        assert_eq!(Expansion::Recursive.to_string(), "recursive");
    }
}
