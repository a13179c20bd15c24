//! Battle events - the one-way presentation channel out of the engine.
//!
//! The engine never prints. Everything a player should read is emitted as a
//! [`BattleEvent`] into an [`EventSink`]; the event's `Display` impl renders
//! the narration line.

use serde::{Deserialize, Serialize};

use potion_rules::StatusKind;

/// Something that happened during a battle or between battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted { stage: u32, enemies: Vec<String> },
    RoundStarted { round: u32 },
    PotionThrown { thrower: String, target: String, ingredients: usize },
    Attacked { attacker: String, target: String, damage: f64 },
    HealthChanged { target: String, delta: f64, source: String },
    Afflicted { target: String, effect: StatusKind, turns: i32, potency: i32 },
    Cleansed { target: String, removed: usize },
    Fizzled { target: String, source: String },
    EffectTicked { target: String, effect: StatusKind, delta: f64 },
    EffectExpired { target: String, effect: StatusKind },
    Dazed { name: String },
    Skipped { name: String },
    Died { name: String },
    Victory { reward: f64 },
    Defeat { name: String },
    Surrendered { name: String },
    StageAdvanced { stage: u32 },
    Invigorated { name: String, healed: f64 },
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleEvent::BattleStarted { stage, enemies } => {
                write!(f, "Stage {}: {} approach!", stage, enemies.join(", "))
            }
            BattleEvent::RoundStarted { round } => write!(f, "--- Round {} ---", round),
            BattleEvent::PotionThrown {
                thrower,
                target,
                ingredients,
            } => {
                if *ingredients == 0 {
                    write!(f, "{} throws an empty flask at {}", thrower, target)
                } else {
                    write!(
                        f,
                        "{} throws a potion of {} ingredient(s) at {}",
                        thrower, ingredients, target
                    )
                }
            }
            BattleEvent::Attacked {
                attacker,
                target,
                damage,
            } => write!(f, "{} attacks {} for {:.2} damage", attacker, target, damage),
            BattleEvent::HealthChanged {
                target,
                delta,
                source,
            } => {
                if *delta < 0.0 {
                    write!(f, "{} takes {:.2} damage from {}", target, -delta, source)
                } else {
                    write!(f, "{} recovers {:.2} health from {}", target, delta, source)
                }
            }
            BattleEvent::Afflicted {
                target,
                effect,
                turns,
                potency,
            } => write!(
                f,
                "{} is afflicted with {} (POT {}) for {} turns",
                target,
                effect.name(),
                potency,
                turns
            ),
            BattleEvent::Cleansed { target, removed } => {
                write!(f, "{} is cleansed of {} status effect(s)", target, removed)
            }
            BattleEvent::Fizzled { target, source } => {
                write!(f, "{} had no further effect on {}", source, target)
            }
            BattleEvent::EffectTicked {
                target,
                effect,
                delta,
            } => {
                if *delta < 0.0 {
                    write!(f, "{} suffers {:.2} from {}", target, -delta, effect.name())
                } else {
                    write!(f, "{} gains {:.2} from {}", target, delta, effect.name())
                }
            }
            BattleEvent::EffectExpired { target, effect } => {
                write!(f, "{} wore off {}", effect.name(), target)
            }
            BattleEvent::Dazed { name } => write!(f, "{} is dazed and confused", name),
            BattleEvent::Skipped { name } => write!(f, "{} cannot act this turn", name),
            BattleEvent::Died { name } => write!(f, "{} has died", name),
            BattleEvent::Victory { reward } => {
                write!(f, "Victory! You collect {:.2} gold", reward)
            }
            BattleEvent::Defeat { name } => write!(f, "{} has fallen. Game over.", name),
            BattleEvent::Surrendered { name } => write!(f, "{} flees the battle", name),
            BattleEvent::StageAdvanced { stage } => write!(f, "Onward to stage {}", stage),
            BattleEvent::Invigorated { name, healed } => {
                write!(f, "{} feels stronger (+{:.2} health)", name, healed)
            }
        }
    }
}

/// Receiver for battle events. Never read back by the engine.
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

impl<F> EventSink for F
where
    F: FnMut(BattleEvent),
{
    fn emit(&mut self, event: BattleEvent) {
        self(event)
    }
}

/// An in-memory transcript of emitted events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Export the transcript, one JSON object per line.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}
