//! Error types for the battle engine, the game session and configuration.

use std::path::PathBuf;

use potion_rules::{EntityId, RulesError};
use thiserror::Error;

/// Contract violations detected while resolving a battle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    #[error("selection index {index} is out of range for {len} entries")]
    InvalidSelection { index: usize, len: usize },

    #[error("selection index {index} was chosen more than once")]
    DuplicateSelection { index: usize },

    #[error("target {0} is not part of the live roster")]
    StaleTarget(EntityId),

    #[error("roster index {index} is out of range for {len} enemies")]
    UnknownActor { index: usize, len: usize },

    #[error("the battle has already ended")]
    BattleOver,

    #[error("no kind is registered for roll {index}")]
    UnknownKind { index: usize },

    #[error(transparent)]
    Rules(RulesError),
}

impl From<RulesError> for BattleError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::InvalidSelection { index, len } => {
                BattleError::InvalidSelection { index, len }
            }
            RulesError::DuplicateSelection { index } => BattleError::DuplicateSelection { index },
            other => BattleError::Rules(other),
        }
    }
}

/// Errors raised by the game session between battles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("shop slot {index} does not exist ({len} items on offer)")]
    InvalidShopIndex { index: usize, len: usize },

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Battle(#[from] BattleError),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
