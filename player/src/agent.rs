//! Agent metadata: the `key=value` argument string every agent is built from.

use std::collections::BTreeMap;
use std::str::FromStr;

use engine_core::Side;
use mcts::SearchError;
use thiserror::Error;

/// Keys every agent starts with; user arguments override them.
const DEFAULT_ARGS: &str = "name=unknown role=unknown";

/// Characters an agent name may not contain.
const RESERVED_NAME_CHARS: &[char] = &['[', ']', '(', ')', ':', ';', ' '];

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("unknown search: {0}")]
    UnknownSearch(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Properties of an agent, parsed from whitespace-separated `key=value` pairs.
///
/// A token without `=` is stored with itself as both key and value. Later
/// tokens overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMeta {
    meta: BTreeMap<String, String>,
}

impl AgentMeta {
    pub fn parse(args: &str) -> Self {
        let mut meta = Self {
            meta: BTreeMap::new(),
        };
        for token in DEFAULT_ARGS.split_whitespace().chain(args.split_whitespace()) {
            meta.notify(token);
        }
        meta
    }

    /// Stored value for `key`, if any.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Set or overwrite one property from a `key=value` message.
    pub fn notify(&mut self, msg: &str) {
        let (key, value) = msg.split_once('=').unwrap_or((msg, msg));
        self.meta.insert(key.to_string(), value.to_string());
    }

    pub fn name(&self) -> &str {
        self.property("name").unwrap_or("unknown")
    }

    pub fn role(&self) -> &str {
        self.property("role").unwrap_or("unknown")
    }

    /// Check the name against the reserved characters.
    pub fn validate_name(&self) -> Result<(), AgentError> {
        let name = self.name();
        if name.contains(RESERVED_NAME_CHARS) {
            return Err(AgentError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Side named by `role`; only `black` and `white` are accepted.
    pub fn side(&self) -> Result<Side, AgentError> {
        self.role()
            .parse()
            .map_err(|_| AgentError::InvalidRole(self.role().to_string()))
    }

    /// Parse the value stored under `key`, or None when the key is absent.
    pub fn parse_value<T: FromStr>(&self, key: &str) -> Result<Option<T>, AgentError> {
        match self.property(key) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| AgentError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Random seed from `seed=`, if given.
    pub fn seed(&self) -> Result<Option<u64>, AgentError> {
        self.parse_value("seed")
    }
}
