//! Status effects: timed modifiers attached to a single entity.
//!
//! Each effect carries a kind, a remaining-turn counter and a potency. The
//! kind decides how the effect reshapes damage taken, healing received and
//! attack output, how much health it drains or restores every turn, and any
//! extra per-turn behavior.

use serde::{Deserialize, Serialize};

use crate::mechanics::{Element, HealthSource, RandomSource};

/// The closed set of status effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Burn,
    Freeze,
    Poison,
    Wither,
    Regeneration,
    Protection,
    Strength,
    Confusion,
}

impl StatusKind {
    pub const ALL: [StatusKind; 8] = [
        StatusKind::Burn,
        StatusKind::Freeze,
        StatusKind::Poison,
        StatusKind::Wither,
        StatusKind::Regeneration,
        StatusKind::Protection,
        StatusKind::Strength,
        StatusKind::Confusion,
    ];

    /// Element this kind is tagged with.
    pub fn element(&self) -> Element {
        match self {
            StatusKind::Burn => Element::Fire,
            StatusKind::Freeze => Element::Ice,
            StatusKind::Poison => Element::Nature,
            StatusKind::Wither => Element::Underworld,
            StatusKind::Regeneration => Element::Regenerating,
            StatusKind::Protection => Element::Protective,
            StatusKind::Strength => Element::Strengthening,
            StatusKind::Confusion => Element::Chaos,
        }
    }

    /// Health change per turn per point of potency. Negative hurts.
    pub fn base_rate(&self) -> f64 {
        match self {
            StatusKind::Burn => -3.0,
            StatusKind::Freeze => -1.0,
            StatusKind::Poison => -5.0,
            StatusKind::Wither => -1.0,
            StatusKind::Regeneration => 3.0,
            StatusKind::Protection | StatusKind::Strength | StatusKind::Confusion => 0.0,
        }
    }

    /// Whether a cleanser would want this gone.
    pub fn is_harmful(&self) -> bool {
        matches!(
            self,
            StatusKind::Burn
                | StatusKind::Freeze
                | StatusKind::Poison
                | StatusKind::Wither
                | StatusKind::Confusion
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Burn => "Burning",
            StatusKind::Freeze => "Frozen",
            StatusKind::Poison => "Poison",
            StatusKind::Wither => "Wither",
            StatusKind::Regeneration => "Regeneration",
            StatusKind::Protection => "Protection",
            StatusKind::Strength => "Strength",
            StatusKind::Confusion => "Confused",
        }
    }

    /// Name used when this kind is the cause of a health change.
    pub fn source_title(&self) -> &'static str {
        match self {
            StatusKind::Burn => "Scorching Flames",
            StatusKind::Freeze => "Frigid Ice",
            StatusKind::Poison => "Sickening Poison",
            StatusKind::Wither => "Weakening Wither",
            StatusKind::Regeneration => "Soothing Regeneration",
            StatusKind::Protection => "Guarding Protection",
            StatusKind::Strength => "Powerful Strength",
            StatusKind::Confusion => "Strange Confusion",
        }
    }

    /// Short summary of what the kind changes.
    pub fn traits(&self) -> &'static str {
        match self {
            StatusKind::Burn => "(+Damage Taken)",
            StatusKind::Freeze => "(+Damage Taken, -Attack Damage, +Skips Turn)",
            StatusKind::Poison => "(-Healing Received, Stops at 10% MAXHP)",
            StatusKind::Wither => "(-No Healing, -Attack Damage)",
            StatusKind::Regeneration => "(+Healing Over Time)",
            StatusKind::Protection => "(-Damage Taken)",
            StatusKind::Strength => "(-Damage Taken, +Damage Dealt)",
            StatusKind::Confusion => "(Damage Dealt, Damage Taken and Healing Randomized)",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extra behavior an effect may trigger during its owner's turn pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnHook {
    /// The owner loses its next action.
    SkipAction,
}

/// An active, timed modifier.
///
/// Potency is fixed at application; only the turn counter changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusKind,
    turns: i32,
    potency: i32,
}

impl StatusEffect {
    /// Create an effect lasting `turns` owner turn passes.
    pub fn new(kind: StatusKind, turns: i32, potency: i32) -> Self {
        Self {
            kind,
            turns,
            potency,
        }
    }

    pub fn burn(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Burn, turns, potency)
    }

    pub fn freeze(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Freeze, turns, potency)
    }

    pub fn poison(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Poison, turns, potency)
    }

    pub fn wither(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Wither, turns, potency)
    }

    pub fn regeneration(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Regeneration, turns, potency)
    }

    pub fn protection(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Protection, turns, potency)
    }

    pub fn strength(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Strength, turns, potency)
    }

    pub fn confusion(turns: i32, potency: i32) -> Self {
        Self::new(StatusKind::Confusion, turns, potency)
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn element(&self) -> Element {
        self.kind.element()
    }

    pub fn turns_left(&self) -> i32 {
        self.turns
    }

    pub fn potency(&self) -> i32 {
        self.potency
    }

    /// Count down one turn. No bounds check: anything at or below zero is expired.
    pub fn tick(&mut self) {
        self.turns -= 1;
    }

    pub fn is_expired(&self) -> bool {
        self.turns <= 0
    }

    /// Health change this effect causes once per owner turn pass.
    pub fn periodic_delta(&self) -> f64 {
        self.kind.base_rate() * self.potency as f64
    }

    /// Reshape incoming damage (a negative amount).
    pub fn transform_damage_taken(&self, amount: f64, dice: &mut dyn RandomSource) -> f64 {
        match self.kind {
            StatusKind::Burn => amount * 1.1_f64.powi(self.potency),
            StatusKind::Freeze => amount * 1.25_f64.powi(self.potency),
            StatusKind::Protection => amount * 0.8_f64.powi(self.potency),
            StatusKind::Strength => amount * 0.9_f64.powi(self.potency),
            StatusKind::Confusion => scramble(amount, dice),
            StatusKind::Poison | StatusKind::Wither | StatusKind::Regeneration => amount,
        }
    }

    /// Reshape incoming healing (a positive amount).
    pub fn transform_healing_received(&self, amount: f64, dice: &mut dyn RandomSource) -> f64 {
        match self.kind {
            StatusKind::Poison => amount / 1.5_f64.powi(self.potency),
            StatusKind::Wither => 0.0,
            StatusKind::Confusion => scramble(amount, dice),
            _ => amount,
        }
    }

    /// Reshape the owner's outgoing attack.
    pub fn transform_attack_output(&self, amount: f64, dice: &mut dyn RandomSource) -> f64 {
        match self.kind {
            StatusKind::Freeze => amount * 0.9_f64.powi(self.potency),
            StatusKind::Wither => amount * 0.75_f64.powi(self.potency),
            StatusKind::Strength => amount * 1.5_f64.powi(self.potency),
            StatusKind::Confusion => scramble(amount, dice),
            _ => amount,
        }
    }

    /// Per-turn behavior beyond the periodic health change.
    ///
    /// Freeze needs no hook: its skip is derived live from the ice element
    /// for as long as the effect is attached.
    pub fn turn_hook(&self, dice: &mut dyn RandomSource) -> Option<TurnHook> {
        match self.kind {
            StatusKind::Confusion if dice.one_in(5) => Some(TurnHook::SkipAction),
            _ => None,
        }
    }

    /// Lowest health this effect's own tick may leave its owner at.
    pub fn health_floor(&self, max_health: f64) -> Option<f64> {
        match self.kind {
            StatusKind::Poison => Some(max_health * 0.1),
            _ => None,
        }
    }

    /// This effect as the cause of a health change.
    pub fn source(&self) -> HealthSource {
        HealthSource::Effect {
            kind: self.kind,
            potency: self.potency,
        }
    }

    /// One-line summary for effect lists.
    pub fn summary(&self) -> String {
        format!(
            "{}, {} Turns, {} Damage / Turn {}",
            self.kind.name(),
            self.turns,
            0.0 - self.periodic_delta(),
            self.kind.traits()
        )
    }

    /// Multi-line description for inspection screens.
    pub fn describe(&self) -> String {
        format!(
            "[ ( Status Effect : {} ) ]\n* Potency: {}\n* Lasts for: {} turns\n\
             * Damage: {} / turn\n{}\n",
            self.kind.name(),
            self.potency,
            self.turns,
            0.0 - self.periodic_delta(),
            self.kind.traits()
        )
    }
}

/// Confusion replaces any amount with a uniform value of the same magnitude
/// bound but either sign.
fn scramble(amount: f64, dice: &mut dyn RandomSource) -> f64 {
    let bound = amount.abs();
    dice.real_in(-bound, bound)
}
