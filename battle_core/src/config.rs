//! Game configuration, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Starting stats for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub max_health: f64,
    pub damage: f64,
    pub gold: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Alchemist".to_string(),
            max_health: 100.0,
            damage: 15.0,
            gold: 50.0,
        }
    }
}

/// How many ingredients the shop offers at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub min_items: usize,
    pub max_items: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            min_items: 6,
            max_items: 8,
        }
    }
}

/// Top-level configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed for reproducible sessions. Entropy when absent.
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    /// Size of the starting kit.
    pub starting_ingredients: usize,
    pub shop: ShopConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player: PlayerConfig::default(),
            starting_ingredients: 3,
            shop: ShopConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.player.max_health, 100.0);
        assert_eq!(config.shop.max_items, 8);
    }

    #[test]
    fn test_partial_config() {
        let config = GameConfig::from_toml_str(
            r#"
            seed = 42
            starting_ingredients = 5

            [player]
            name = "Morgana"
            gold = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.starting_ingredients, 5);
        assert_eq!(config.player.name, "Morgana");
        assert_eq!(config.player.gold, 120.0);
        assert_eq!(config.player.damage, 15.0);
        assert_eq!(config.shop, ShopConfig::default());
    }

    #[test]
    fn test_bad_config_is_parse_error() {
        let err = GameConfig::from_toml_str("seed = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here/potionmaker.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
