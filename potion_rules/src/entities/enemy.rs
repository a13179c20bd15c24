//! Enemies and their behavior kinds.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::mechanics::{Element, HealthSource};

/// Behavior kind of an enemy. Decides both its element and its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Flaming,
    Chilling,
    Poisonous,
    Withering,
    Healing,
    Regenerative,
    Protective,
    Strengthening,
    Cleansing,
    Joker,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 10] = [
        EnemyKind::Flaming,
        EnemyKind::Chilling,
        EnemyKind::Poisonous,
        EnemyKind::Withering,
        EnemyKind::Healing,
        EnemyKind::Regenerative,
        EnemyKind::Protective,
        EnemyKind::Strengthening,
        EnemyKind::Cleansing,
        EnemyKind::Joker,
    ];

    pub fn element(&self) -> Element {
        match self {
            EnemyKind::Flaming => Element::Fire,
            EnemyKind::Chilling => Element::Ice,
            EnemyKind::Poisonous => Element::Nature,
            EnemyKind::Withering => Element::Underworld,
            EnemyKind::Healing => Element::Healing,
            EnemyKind::Regenerative => Element::Regenerating,
            EnemyKind::Protective => Element::Protective,
            EnemyKind::Strengthening => Element::Strengthening,
            EnemyKind::Cleansing => Element::Purifying,
            EnemyKind::Joker => Element::Chaos,
        }
    }

    /// Whether this kind's signature move targets its own party.
    pub fn supports_allies(&self) -> bool {
        matches!(
            self,
            EnemyKind::Healing
                | EnemyKind::Regenerative
                | EnemyKind::Protective
                | EnemyKind::Strengthening
                | EnemyKind::Cleansing
        )
    }
}

/// Max health of an enemy at a level.
pub fn enemy_max_health(level: u32) -> f64 {
    50.0 + level as f64 * 10.0
}

/// Base damage of an enemy at a level.
pub fn enemy_damage(level: u32) -> f64 {
    5.0 + level as f64 * 2.0
}

/// A hostile combatant. Lives for exactly one encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub entity: Entity,
    kind: EnemyKind,
    level: u32,
}

impl Enemy {
    /// Create an enemy with level-scaled stats.
    pub fn new(name: impl Into<String>, kind: EnemyKind, level: u32) -> Self {
        let level = level.max(1);
        Self {
            entity: Entity::new(name, kind.element(), enemy_max_health(level), enemy_damage(level)),
            kind,
            level,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    /// This enemy as the cause of a health change.
    pub fn source(&self) -> HealthSource {
        HealthSource::Enemy {
            name: self.entity.name().to_string(),
            level: self.level,
        }
    }
}

impl std::fmt::Display for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Level {}) - HP: {:.1}/{:.1}",
            self.entity.name(),
            self.level,
            self.entity.health(),
            self.entity.max_health()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_scaling() {
        let enemy = Enemy::new("Ember Imp", EnemyKind::Flaming, 3);
        assert_eq!(enemy.entity.max_health(), 80.0);
        assert_eq!(enemy.entity.health(), 80.0);
        assert_eq!(enemy.entity.base_damage(), 11.0);
        assert_eq!(enemy.entity.element, Element::Fire);
    }

    #[test]
    fn test_level_zero_is_raised() {
        let enemy = Enemy::new("Wisp", EnemyKind::Joker, 0);
        assert_eq!(enemy.level(), 1);
    }

    #[test]
    fn test_enemy_display() {
        let enemy = Enemy::new("Frost Wraith", EnemyKind::Chilling, 1);
        assert_eq!(enemy.to_string(), "Frost Wraith (Level 1) - HP: 60.0/60.0");
    }

    #[test]
    fn test_support_kinds() {
        assert!(EnemyKind::Cleansing.supports_allies());
        assert!(!EnemyKind::Joker.supports_allies());
        assert_eq!(EnemyKind::ALL.len(), 10);
    }
}
