//! Combat entities: the shared entity core plus the player and enemies.

mod enemy;
mod player;

pub use enemy::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effects::{StatusEffect, StatusKind, TurnHook};
use crate::mechanics::{round_cents, Element, HealthSource, RandomSource};

/// Unique identifier for every combat participant.
///
/// Rosters hand these out instead of references, so a target that died
/// earlier in the round simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health change produced by one effect during a turn pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectTick {
    pub kind: StatusKind,
    pub potency: i32,
    /// Delta actually committed, after transforms and floors.
    pub delta: f64,
}

/// Everything that happened to an entity during `process_turn`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub ticks: Vec<EffectTick>,
    pub expired: Vec<StatusKind>,
    /// The entity will lose its next action.
    pub dazed: bool,
}

/// The mutable combat subject shared by the player and enemies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    name: String,
    pub element: Element,
    max_health: f64,
    health: f64,
    base_damage: f64,

    /// Active effects in application order.
    effects: Vec<StatusEffect>,

    /// Set by a skip hook during the latest turn pass.
    dazed: bool,
}

impl Entity {
    /// Create an entity at full health.
    pub fn new(
        name: impl Into<String>,
        element: Element,
        max_health: f64,
        base_damage: f64,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            element,
            max_health,
            health: max_health,
            base_damage,
            effects: Vec::new(),
            dazed: false,
        }
    }

    /// Start at a specific health instead of full.
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    /// Current health as a fraction of max health.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }

    pub fn base_damage(&self) -> f64 {
        self.base_damage
    }

    /// Active effects in application order.
    pub fn status_effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    /// Attach an effect after every existing one.
    pub fn apply_status_effect(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Drop every effect. Returns how many were removed.
    pub fn clear_status_effects(&mut self) -> usize {
        let removed = self.effects.len();
        self.effects.clear();
        removed
    }

    /// Apply a health change after folding it through every active effect.
    ///
    /// Harmful amounts go through `transform_damage_taken`, beneficial ones
    /// through `transform_healing_received`, in application order. The result
    /// is capped at max health but never floored. Returns the committed delta.
    pub fn modify_health(
        &mut self,
        amount: f64,
        source: &HealthSource,
        dice: &mut dyn RandomSource,
    ) -> f64 {
        let delta = self.fold_delta(amount, None, dice);
        self.commit(delta);
        tracing::trace!(
            entity = %self.name,
            raw = amount,
            delta,
            health = self.health,
            source = %source,
            "health modified"
        );
        delta
    }

    /// Base damage folded through every effect's attack transform.
    pub fn effective_damage(&self, dice: &mut dyn RandomSource) -> f64 {
        self.effects.iter().fold(self.base_damage, |damage, effect| {
            round_cents(effect.transform_attack_output(damage, dice))
        })
    }

    /// Run one turn pass over every effect present at the start of the call.
    ///
    /// Each effect applies its periodic delta (through the transforms of the
    /// other effects), triggers its hook and ticks. Expired effects are
    /// removed only after every effect has been processed.
    pub fn process_turn(&mut self, dice: &mut dyn RandomSource) -> TurnReport {
        let mut report = TurnReport::default();
        self.dazed = false;

        for index in 0..self.effects.len() {
            let effect = self.effects[index];

            let periodic = effect.periodic_delta();
            if periodic != 0.0 {
                let mut delta = self.fold_delta(periodic, Some(index), dice);
                if let Some(floor) = effect.health_floor(self.max_health) {
                    if delta < 0.0 {
                        delta = delta.max((floor - self.health).min(0.0));
                    }
                }
                self.commit(delta);
                tracing::trace!(
                    entity = %self.name,
                    delta,
                    health = self.health,
                    source = %effect.source(),
                    "effect ticked"
                );
                report.ticks.push(EffectTick {
                    kind: effect.kind(),
                    potency: effect.potency(),
                    delta,
                });
            }

            if let Some(TurnHook::SkipAction) = effect.turn_hook(dice) {
                self.dazed = true;
            }

            self.effects[index].tick();
        }

        report.expired = self
            .effects
            .iter()
            .filter(|e| e.is_expired())
            .map(|e| e.kind())
            .collect();
        self.effects.retain(|e| !e.is_expired());
        report.dazed = self.dazed;

        report
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether any active effect carries the given element.
    pub fn is_impaired_by(&self, element: Element) -> bool {
        self.effects.iter().any(|e| e.element() == element)
    }

    /// Whether this entity loses its action this round.
    ///
    /// Derived live: frozen entities always skip, and a confusion daze from
    /// the latest turn pass skips once.
    pub fn skips_action(&self) -> bool {
        self.dazed || self.is_impaired_by(Element::Ice)
    }

    /// Sum of potencies of every active effect of a kind.
    pub fn potency_of(&self, kind: StatusKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind() == kind)
            .map(|e| e.potency())
            .sum()
    }

    /// Number of active effects a cleanser would remove.
    pub fn harmful_effect_count(&self) -> usize {
        self.effects.iter().filter(|e| e.kind().is_harmful()).count()
    }

    /// Short status line for lists.
    pub fn pretty(&self) -> String {
        format!(
            "{}, {:.2}/{:.2} HP, {} Status Effects",
            self.name,
            self.health,
            self.max_health,
            self.effects.len()
        )
    }

    /// Full description for inspection screens.
    pub fn inspection(&self) -> String {
        let mut text = format!(
            "Name: {}\nHealth: {:.2}/{:.2}\nType: {}\n",
            self.name, self.health, self.max_health, self.element
        );
        if !self.effects.is_empty() {
            text.push_str("Status Effects:\n");
            for effect in &self.effects {
                text.push_str(&format!("- {}\n", effect.summary()));
            }
        }
        text
    }

    fn fold_delta(&self, amount: f64, exclude: Option<usize>, dice: &mut dyn RandomSource) -> f64 {
        let harmful = amount < 0.0;
        self.effects
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exclude)
            .fold(amount, |value, (_, effect)| {
                let next = if harmful {
                    effect.transform_damage_taken(value, dice)
                } else {
                    effect.transform_healing_received(value, dice)
                };
                round_cents(next)
            })
    }

    fn commit(&mut self, delta: f64) {
        self.health = (self.health + delta).min(self.max_health);
    }
}
