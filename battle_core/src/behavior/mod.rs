//! Enemy behavior - one decision per enemy per round, by kind.
//!
//! `decide` only chooses; the battle loop applies the chosen action. Support
//! kinds never pick themselves as the ally to help.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use potion_rules::{Element, Enemy, EnemyKind, EntityId, RandomSource, StatusEffect, StatusKind};

use crate::error::BattleError;

/// Who an action lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player,
    Enemy(EntityId),
}

/// What an enemy does with its turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyAction {
    /// Strike for an already-rolled amount of damage.
    Attack { target: Target, damage: f64 },
    /// Attach a copy of `effect` to each target.
    Afflict { targets: Vec<Target>, effect: StatusEffect },
    Heal { target: Target, amount: f64 },
    Cleanse { target: Target },
    /// The attempt failed on its own.
    Fizzle { effect: StatusKind },
}

impl EnemyAction {
    fn is_supportive(&self) -> bool {
        match self {
            EnemyAction::Attack { .. } | EnemyAction::Fizzle { .. } => false,
            EnemyAction::Afflict { effect, .. } => !effect.kind().is_harmful(),
            EnemyAction::Heal { .. } | EnemyAction::Cleanse { .. } => true,
        }
    }
}

const HEAL_THRESHOLD: f64 = 0.6;
const REGEN_THRESHOLD: f64 = 0.4;

/// Choose the action for `roster[actor]`.
///
/// Fails only when `actor` is not a roster index.
pub fn decide(
    actor: usize,
    roster: &[Enemy],
    dice: &mut dyn RandomSource,
) -> Result<EnemyAction, BattleError> {
    let enemy = roster.get(actor).ok_or(BattleError::UnknownActor {
        index: actor,
        len: roster.len(),
    })?;
    let level = enemy.level() as i32;

    let action = match enemy.kind() {
        EnemyKind::Flaming => {
            if dice.one_in(2) {
                if dice.one_in(4) {
                    let mut targets = vec![Target::Player];
                    targets.extend(
                        allies(actor, roster).map(|(_, ally)| Target::Enemy(ally.entity.id)),
                    );
                    EnemyAction::Afflict {
                        targets,
                        effect: StatusEffect::burn(2 * level, (level + 1) / 2),
                    }
                } else if dice.one_in(3) {
                    EnemyAction::Afflict {
                        targets: vec![Target::Player],
                        effect: StatusEffect::burn(2 * level, level + 1),
                    }
                } else {
                    EnemyAction::Afflict {
                        targets: vec![Target::Player],
                        effect: StatusEffect::burn(2 * level, level),
                    }
                }
            } else {
                let mut action = attack(enemy, dice);
                if dice.one_in(5) {
                    if let EnemyAction::Attack { damage, .. } = &mut action {
                        *damage *= 1.5;
                    }
                }
                action
            }
        }
        EnemyKind::Chilling => {
            if dice.one_in(3) {
                if dice.one_in(2) {
                    EnemyAction::Fizzle {
                        effect: StatusKind::Freeze,
                    }
                } else {
                    EnemyAction::Afflict {
                        targets: vec![Target::Player],
                        effect: StatusEffect::freeze((level + 3) / 4, level),
                    }
                }
            } else {
                attack(enemy, dice)
            }
        }
        EnemyKind::Poisonous => {
            if dice.one_in(2) {
                EnemyAction::Afflict {
                    targets: vec![Target::Player],
                    effect: StatusEffect::poison(2 * level, level),
                }
            } else {
                attack(enemy, dice)
            }
        }
        EnemyKind::Withering => {
            if dice.one_in(4) {
                EnemyAction::Afflict {
                    targets: vec![Target::Player],
                    effect: StatusEffect::wither(4 * level, level),
                }
            } else {
                attack(enemy, dice)
            }
        }
        EnemyKind::Healing => match weakest_ally(actor, roster, HEAL_THRESHOLD) {
            Some(id) => EnemyAction::Heal {
                target: Target::Enemy(id),
                amount: 10.0 + 5.5 * level as f64,
            },
            None => attack(enemy, dice),
        },
        EnemyKind::Regenerative => match weakest_ally(actor, roster, REGEN_THRESHOLD) {
            Some(id) => EnemyAction::Afflict {
                targets: vec![Target::Enemy(id)],
                effect: StatusEffect::regeneration(2 * level, level),
            },
            None => attack(enemy, dice),
        },
        EnemyKind::Protective => match least_buffed_ally(actor, roster, StatusKind::Protection) {
            Some(id) => EnemyAction::Afflict {
                targets: vec![Target::Enemy(id)],
                effect: StatusEffect::protection(4 * level, level),
            },
            None => attack(enemy, dice),
        },
        EnemyKind::Strengthening => match least_buffed_ally(actor, roster, StatusKind::Strength) {
            Some(id) => EnemyAction::Afflict {
                targets: vec![Target::Enemy(id)],
                effect: StatusEffect::strength(2 * level, level),
            },
            None => attack(enemy, dice),
        },
        EnemyKind::Cleansing => {
            let sickest = allies(actor, roster)
                .filter(|(_, ally)| ally.entity.harmful_effect_count() > 0)
                .min_by_key(|(_, ally)| Reverse(ally.entity.harmful_effect_count()))
                .map(|(_, ally)| ally.entity.id);
            match sickest {
                Some(id) => EnemyAction::Cleanse {
                    target: Target::Enemy(id),
                },
                None => attack(enemy, dice),
            }
        }
        EnemyKind::Joker => EnemyAction::Afflict {
            targets: vec![Target::Player],
            effect: StatusEffect::confusion(2 * level, level),
        },
    };

    let action = if enemy.entity.is_impaired_by(Element::Chaos) && dice.one_in(3) {
        redirect(action, roster, dice)
    } else {
        action
    };

    tracing::debug!(
        enemy = %enemy.name(),
        kind = ?enemy.kind(),
        support = enemy.kind().supports_allies(),
        ?action,
        "enemy decided"
    );

    Ok(action)
}

fn attack(enemy: &Enemy, dice: &mut dyn RandomSource) -> EnemyAction {
    let damage = enemy.entity.effective_damage(dice) * dice.real_in(0.8, 1.2);
    EnemyAction::Attack {
        target: Target::Player,
        damage,
    }
}

/// Live roster members other than the actor.
fn allies(actor: usize, roster: &[Enemy]) -> impl Iterator<Item = (usize, &Enemy)> {
    roster
        .iter()
        .enumerate()
        .filter(move |(index, ally)| *index != actor && !ally.entity.is_dead())
}

fn weakest_ally(actor: usize, roster: &[Enemy], threshold: f64) -> Option<EntityId> {
    allies(actor, roster)
        .filter(|(_, ally)| ally.entity.health_fraction() < threshold)
        .min_by(|(_, a), (_, b)| {
            a.entity
                .health_fraction()
                .partial_cmp(&b.entity.health_fraction())
                .unwrap_or(Ordering::Equal)
        })
        .map(|(_, ally)| ally.entity.id)
}

fn least_buffed_ally(actor: usize, roster: &[Enemy], kind: StatusKind) -> Option<EntityId> {
    allies(actor, roster)
        .min_by_key(|(_, ally)| ally.entity.potency_of(kind))
        .map(|(_, ally)| ally.entity.id)
}

/// A confused actor loses control of its action.
///
/// Hostile actions land on a random roster member, possibly the actor
/// itself. Supportive actions land on the player.
fn redirect(action: EnemyAction, roster: &[Enemy], dice: &mut dyn RandomSource) -> EnemyAction {
    if action.is_supportive() {
        return match action {
            EnemyAction::Afflict { effect, .. } => EnemyAction::Afflict {
                targets: vec![Target::Player],
                effect,
            },
            EnemyAction::Heal { amount, .. } => EnemyAction::Heal {
                target: Target::Player,
                amount,
            },
            EnemyAction::Cleanse { .. } => EnemyAction::Cleanse {
                target: Target::Player,
            },
            other => other,
        };
    }

    let Some(victim) = roster.get(dice.index_below(roster.len())) else {
        return action;
    };
    let target = Target::Enemy(victim.entity.id);
    match action {
        EnemyAction::Attack { damage, .. } => EnemyAction::Attack { target, damage },
        EnemyAction::Afflict { effect, .. } => EnemyAction::Afflict {
            targets: vec![target],
            effect,
        },
        other => other,
    }
}
