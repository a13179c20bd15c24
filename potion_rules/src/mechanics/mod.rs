//! Game mechanics: elements, health sources, consequences and randomness.

mod dice;

pub use dice::*;

use serde::{Deserialize, Serialize};

use crate::effects::{StatusEffect, StatusKind};
use crate::ingredients::IngredientKind;

/// Elemental tag carried by entities and status effects.
///
/// Purely classificatory: the rules use it to ask questions such as
/// "is this entity affected by anything icy".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Ice,
    Nature,
    Underworld,
    /// Blessing.
    Regenerating,
    /// Holy.
    Healing,
    /// Earth.
    Protective,
    /// Blood.
    Strengthening,
    /// Purity.
    Purifying,
    Chaos,
    /// Boring.
    Neutral,
}

impl Element {
    /// Display name of the element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Nature => "Nature",
            Element::Underworld => "Underworld",
            Element::Regenerating => "Regenerating",
            Element::Healing => "Healing",
            Element::Protective => "Protective",
            Element::Strengthening => "Strengthening",
            Element::Purifying => "Purifying",
            Element::Chaos => "Chaos",
            Element::Neutral => "Boring",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whoever or whatever caused a change in health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthSource {
    Player { name: String },
    Enemy { name: String, level: u32 },
    Effect { kind: StatusKind, potency: i32 },
    Ingredient {
        name: String,
        kind: IngredientKind,
        potency: i32,
    },
}

impl HealthSource {
    /// Describe the source the way the battle narration names it.
    pub fn describe(&self) -> String {
        match self {
            HealthSource::Player { name } => format!("The player, {}", name),
            HealthSource::Enemy { name, level } => {
                format!("The fiend, {}, LVL {}", name, level)
            }
            HealthSource::Effect { kind, potency } => {
                format!("{} (POT {})", kind.source_title(), potency)
            }
            HealthSource::Ingredient {
                name,
                kind,
                potency,
            } => format!("A {}, {}, (POT {})", kind.title(), name, potency),
        }
    }
}

impl std::fmt::Display for HealthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Something that happened to a target as the result of an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Consequence {
    /// Health moved by `delta` after all transforms.
    HealthChanged { delta: f64, source: HealthSource },
    /// A status effect was attached.
    Afflicted { effect: StatusEffect },
    /// Every effect was stripped.
    Cleansed { removed: usize },
    /// The probability check failed.
    NoEffect,
}

/// Round a health quantity to hundredths.
///
/// Every transform step is committed at this precision, which is what makes
/// the order of effects observable.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
