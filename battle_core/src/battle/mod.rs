//! The battle loop - one encounter between the player and a roster.
//!
//! A round runs: player action, player effects, death sweep, each enemy in
//! roster order (with a sweep after every action), enemy effects, final
//! sweep. Surrender ends the battle before the enemies get a turn.

use serde::{Deserialize, Serialize};

use potion_rules::{
    Consequence, Enemy, Entity, EntityId, HealthSource, Player, RandomSource, TurnReport,
};

use crate::behavior::{self, EnemyAction, Target};
use crate::error::BattleError;
use crate::events::{BattleEvent, EventSink};

/// What the player does with a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Throw the selected satchel entries, in selection order, at one target.
    Potion { ingredients: Vec<usize>, target: Target },
    /// A basic attack on one enemy.
    Attack { target: EntityId },
    Surrender,
}

/// Where the battle stands after a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Ongoing,
    Victory { reward: f64 },
    Defeat,
    Surrendered,
}

impl RoundOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::Ongoing)
    }
}

/// Gold granted for a won battle.
///
/// Every defeated enemy is worth `5 + 3 * level + 2 * stage`; the total is
/// scaled once by a random factor in `[0.8, 1.2]`.
pub fn victory_reward(defeated: &[Enemy], stage: u32, dice: &mut dyn RandomSource) -> f64 {
    let base: f64 = defeated
        .iter()
        .map(|enemy| 5.0 + 3.0 * enemy.level() as f64 + 2.0 * stage as f64)
        .sum();
    base * dice.real_in(0.8, 1.2)
}

/// State of one encounter. Owns the roster; the player is lent per round.
#[derive(Debug, Clone)]
pub struct Battle {
    roster: Vec<Enemy>,
    defeated: Vec<Enemy>,
    stage: u32,
    round: u32,
    outcome: RoundOutcome,
}

impl Battle {
    pub fn new(roster: Vec<Enemy>, stage: u32) -> Self {
        Self {
            roster,
            defeated: Vec::new(),
            stage,
            round: 0,
            outcome: RoundOutcome::Ongoing,
        }
    }

    /// Emit the opening line of the encounter.
    pub fn announce(&self, sink: &mut dyn EventSink) {
        tracing::info!(stage = self.stage, enemies = self.roster.len(), "battle started");
        sink.emit(BattleEvent::BattleStarted {
            stage: self.stage,
            enemies: self.roster.iter().map(|e| e.name().to_string()).collect(),
        });
    }

    /// Live enemies in acting order.
    pub fn roster(&self) -> &[Enemy] {
        &self.roster
    }

    pub fn defeated(&self) -> &[Enemy] {
        &self.defeated
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.roster.iter().find(|e| e.entity.id == id)
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Resolve one full round.
    ///
    /// Selections and targets are checked before anything changes; a
    /// rejected action leaves the battle untouched.
    pub fn play_round(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        dice: &mut dyn RandomSource,
        sink: &mut dyn EventSink,
    ) -> Result<RoundOutcome, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        self.validate(player, &action)?;

        self.round += 1;
        tracing::debug!(round = self.round, "round started");
        sink.emit(BattleEvent::RoundStarted { round: self.round });

        if action == PlayerAction::Surrender {
            tracing::info!(stage = self.stage, round = self.round, "player surrendered");
            sink.emit(BattleEvent::Surrendered {
                name: player.name().to_string(),
            });
            return Ok(self.finish(RoundOutcome::Surrendered));
        }

        // Player phase
        if player.entity.skips_action() {
            sink.emit(BattleEvent::Skipped {
                name: player.name().to_string(),
            });
        } else {
            self.player_acts(player, action, dice, sink)?;
        }
        let report = player.entity.process_turn(dice);
        narrate_turn(&player.entity, &report, sink);
        if let Some(outcome) = self.sweep(player, dice, sink) {
            return Ok(outcome);
        }

        // Enemy phase
        tracing::debug!(round = self.round, "enemy phase");
        let order: Vec<EntityId> = self.roster.iter().map(|e| e.entity.id).collect();
        for id in order {
            let Some(index) = self.position(id) else {
                continue;
            };
            let actor = &self.roster[index];
            if actor.entity.is_dead() {
                continue;
            }
            if actor.entity.skips_action() {
                sink.emit(BattleEvent::Skipped {
                    name: actor.name().to_string(),
                });
                continue;
            }
            let action = behavior::decide(index, &self.roster, dice)?;
            self.enemy_acts(index, action, player, dice, sink);
            if let Some(outcome) = self.sweep(player, dice, sink) {
                return Ok(outcome);
            }
        }

        // Enemy effects
        for enemy in &mut self.roster {
            let report = enemy.entity.process_turn(dice);
            narrate_turn(&enemy.entity, &report, sink);
        }
        if let Some(outcome) = self.sweep(player, dice, sink) {
            return Ok(outcome);
        }

        Ok(RoundOutcome::Ongoing)
    }

    fn validate(&self, player: &Player, action: &PlayerAction) -> Result<(), BattleError> {
        let target = match action {
            PlayerAction::Potion {
                ingredients,
                target,
            } => {
                player.check_selection(ingredients)?;
                *target
            }
            PlayerAction::Attack { target } => Target::Enemy(*target),
            PlayerAction::Surrender => return Ok(()),
        };

        if let Target::Enemy(id) = target {
            if self.enemy(id).is_none() {
                tracing::warn!(%id, "rejected action on a target outside the roster");
                return Err(BattleError::StaleTarget(id));
            }
        }
        Ok(())
    }

    fn player_acts(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        dice: &mut dyn RandomSource,
        sink: &mut dyn EventSink,
    ) -> Result<(), BattleError> {
        match action {
            PlayerAction::Potion {
                ingredients,
                target,
            } => {
                let potion = player.take_ingredients(&ingredients)?;
                let thrower = player.name().to_string();
                let Some(entity) = resolve(player, &mut self.roster, target) else {
                    return Ok(());
                };
                tracing::debug!(
                    entity = %entity.name(),
                    ingredients = potion.len(),
                    "potion thrown"
                );
                sink.emit(BattleEvent::PotionThrown {
                    thrower,
                    target: entity.name().to_string(),
                    ingredients: potion.len(),
                });

                for ingredient in potion {
                    if entity.is_dead() {
                        tracing::debug!(entity = %entity.name(), "target died mid-potion");
                        break;
                    }
                    let source = ingredient.source();
                    let consequences = ingredient.apply(entity, dice)?;
                    narrate_consequences(entity, &source, &consequences, sink);
                }
            }
            PlayerAction::Attack { target } => {
                let source = player.source();
                let damage = player.entity.effective_damage(dice) * dice.real_in(0.8, 1.2);
                if let Some(enemy) = self.roster.iter_mut().find(|e| e.entity.id == target) {
                    let delta = enemy.entity.modify_health(-damage, &source, dice);
                    sink.emit(strike(player.name(), &enemy.entity, delta, &source));
                }
            }
            PlayerAction::Surrender => {}
        }
        Ok(())
    }

    fn enemy_acts(
        &mut self,
        actor: usize,
        action: EnemyAction,
        player: &mut Player,
        dice: &mut dyn RandomSource,
        sink: &mut dyn EventSink,
    ) {
        let attacker = self.roster[actor].name().to_string();
        let source = self.roster[actor].source();

        match action {
            EnemyAction::Attack { target, damage } => {
                if let Some(entity) = resolve(player, &mut self.roster, target) {
                    let delta = entity.modify_health(-damage, &source, dice);
                    sink.emit(strike(&attacker, entity, delta, &source));
                }
            }
            EnemyAction::Afflict { targets, effect } => {
                for target in targets {
                    if let Some(entity) = resolve(player, &mut self.roster, target) {
                        entity.apply_status_effect(effect);
                        sink.emit(BattleEvent::Afflicted {
                            target: entity.name().to_string(),
                            effect: effect.kind(),
                            turns: effect.turns_left(),
                            potency: effect.potency(),
                        });
                    }
                }
            }
            EnemyAction::Heal { target, amount } => {
                if let Some(entity) = resolve(player, &mut self.roster, target) {
                    let delta = entity.modify_health(amount, &source, dice);
                    sink.emit(BattleEvent::HealthChanged {
                        target: entity.name().to_string(),
                        delta,
                        source: source.describe(),
                    });
                }
            }
            EnemyAction::Cleanse { target } => {
                if let Some(entity) = resolve(player, &mut self.roster, target) {
                    let removed = entity.clear_status_effects();
                    sink.emit(BattleEvent::Cleansed {
                        target: entity.name().to_string(),
                        removed,
                    });
                }
            }
            EnemyAction::Fizzle { effect } => {
                tracing::debug!(enemy = %attacker, ?effect, "attempt fizzled");
                sink.emit(BattleEvent::Fizzled {
                    target: player.name().to_string(),
                    source: source.describe(),
                });
            }
        }
    }

    /// Remove the dead and decide whether the battle is over.
    ///
    /// A dead player always means defeat, even when the last enemy fell in
    /// the same sweep.
    fn sweep(
        &mut self,
        player: &mut Player,
        dice: &mut dyn RandomSource,
        sink: &mut dyn EventSink,
    ) -> Option<RoundOutcome> {
        let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut self.roster)
            .into_iter()
            .partition(|e| e.entity.is_dead());
        self.roster = alive;
        for enemy in dead {
            tracing::debug!(enemy = %enemy.name(), "enemy died");
            sink.emit(BattleEvent::Died {
                name: enemy.name().to_string(),
            });
            self.defeated.push(enemy);
        }

        if player.entity.is_dead() {
            tracing::info!(stage = self.stage, round = self.round, "player defeated");
            sink.emit(BattleEvent::Died {
                name: player.name().to_string(),
            });
            sink.emit(BattleEvent::Defeat {
                name: player.name().to_string(),
            });
            return Some(self.finish(RoundOutcome::Defeat));
        }

        if self.roster.is_empty() {
            let reward = victory_reward(&self.defeated, self.stage, dice);
            player.add_gold(reward);
            tracing::info!(stage = self.stage, round = self.round, reward, "battle won");
            sink.emit(BattleEvent::Victory { reward });
            return Some(self.finish(RoundOutcome::Victory { reward }));
        }

        None
    }

    fn finish(&mut self, outcome: RoundOutcome) -> RoundOutcome {
        self.outcome = outcome;
        outcome
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.roster.iter().position(|e| e.entity.id == id)
    }
}

/// Look up a live target.
fn resolve<'a>(
    player: &'a mut Player,
    roster: &'a mut [Enemy],
    target: Target,
) -> Option<&'a mut Entity> {
    let entity = match target {
        Target::Player => &mut player.entity,
        Target::Enemy(id) => &mut roster.iter_mut().find(|e| e.entity.id == id)?.entity,
    };
    if entity.is_dead() {
        return None;
    }
    Some(entity)
}

/// Narrate a committed attack. A scrambled strike can end up healing.
fn strike(attacker: &str, target: &Entity, delta: f64, source: &HealthSource) -> BattleEvent {
    if delta > 0.0 {
        return BattleEvent::HealthChanged {
            target: target.name().to_string(),
            delta,
            source: source.describe(),
        };
    }
    BattleEvent::Attacked {
        attacker: attacker.to_string(),
        target: target.name().to_string(),
        damage: if delta < 0.0 { -delta } else { 0.0 },
    }
}

fn narrate_consequences(
    target: &Entity,
    source: &HealthSource,
    consequences: &[Consequence],
    sink: &mut dyn EventSink,
) {
    let name = target.name().to_string();
    for consequence in consequences {
        let event = match consequence {
            Consequence::HealthChanged { delta, source } => BattleEvent::HealthChanged {
                target: name.clone(),
                delta: *delta,
                source: source.describe(),
            },
            Consequence::Afflicted { effect } => BattleEvent::Afflicted {
                target: name.clone(),
                effect: effect.kind(),
                turns: effect.turns_left(),
                potency: effect.potency(),
            },
            Consequence::Cleansed { removed } => BattleEvent::Cleansed {
                target: name.clone(),
                removed: *removed,
            },
            Consequence::NoEffect => BattleEvent::Fizzled {
                target: name.clone(),
                source: source.describe(),
            },
        };
        sink.emit(event);
    }
}

fn narrate_turn(entity: &Entity, report: &TurnReport, sink: &mut dyn EventSink) {
    let name = entity.name();
    for tick in &report.ticks {
        sink.emit(BattleEvent::EffectTicked {
            target: name.to_string(),
            effect: tick.kind,
            delta: tick.delta,
        });
    }
    for kind in &report.expired {
        sink.emit(BattleEvent::EffectExpired {
            target: name.to_string(),
            effect: *kind,
        });
    }
    if report.dazed {
        sink.emit(BattleEvent::Dazed {
            name: name.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use potion_rules::{EnemyKind, FixedDice, Ingredient, IngredientKind, StatusEffect};

    fn player() -> Player {
        Player::new("Tester", 100.0, 15.0, 50.0)
    }

    fn weak(name: &str, kind: EnemyKind) -> Enemy {
        let mut enemy = Enemy::new(name, kind, 1);
        enemy.entity = enemy.entity.with_health(1.0);
        enemy
    }

    fn position_of(log: &EventLog, wanted: &BattleEvent) -> usize {
        log.events()
            .iter()
            .position(|e| e == wanted)
            .unwrap_or_else(|| panic!("missing event {wanted:?}"))
    }

    #[test]
    fn test_dead_enemy_is_swept_before_next_enemy_acts() {
        let first = weak("Ember Imp", EnemyKind::Flaming);
        let second = Enemy::new("Nightshade Wretch", EnemyKind::Poisonous, 1);
        let target = first.entity.id;
        let mut battle = Battle::new(vec![first, second], 1);
        let mut hero = player();
        let mut log = EventLog::new();

        let outcome = battle
            .play_round(
                &mut hero,
                PlayerAction::Attack { target },
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        assert_eq!(outcome, RoundOutcome::Ongoing);
        assert_eq!(battle.roster().len(), 1);
        assert_eq!(battle.defeated().len(), 1);
        assert_eq!(hero.entity.health(), 93.0);

        let died = position_of(
            &log,
            &BattleEvent::Died {
                name: "Ember Imp".into(),
            },
        );
        let struck = position_of(
            &log,
            &BattleEvent::Attacked {
                attacker: "Nightshade Wretch".into(),
                target: "Tester".into(),
                damage: 7.0,
            },
        );
        assert!(died < struck);
    }

    #[test]
    fn test_surrender_is_not_defeat() {
        let mut battle = Battle::new(vec![Enemy::new("Ember Imp", EnemyKind::Flaming, 1)], 1);
        let mut hero = player();
        let mut log = EventLog::new();

        let outcome = battle
            .play_round(
                &mut hero,
                PlayerAction::Surrender,
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        assert_eq!(outcome, RoundOutcome::Surrendered);
        assert_eq!(hero.gold(), 50.0);
        assert_eq!(hero.entity.health(), 100.0);
        assert!(!log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Defeat { .. } | BattleEvent::Attacked { .. })));
    }

    #[test]
    fn test_defeat_ends_battle() {
        let mut battle = Battle::new(
            vec![Enemy::new("Nightshade Wretch", EnemyKind::Poisonous, 1)],
            1,
        );
        let mut hero = player();
        hero.entity = hero.entity.clone().with_health(5.0);
        let mut log = EventLog::new();
        let mut dice = FixedDice::never();

        let outcome = battle
            .play_round(
                &mut hero,
                PlayerAction::Potion {
                    ingredients: vec![],
                    target: Target::Player,
                },
                &mut dice,
                &mut log,
            )
            .unwrap();

        assert_eq!(outcome, RoundOutcome::Defeat);
        assert!(hero.entity.is_dead());
        assert_eq!(hero.gold(), 50.0);
        assert_eq!(
            battle.play_round(&mut hero, PlayerAction::Surrender, &mut dice, &mut log),
            Err(BattleError::BattleOver)
        );
    }

    #[test]
    fn test_victory_grants_reward() {
        let enemy = weak("Ember Imp", EnemyKind::Flaming);
        let target = enemy.entity.id;
        let mut battle = Battle::new(vec![enemy], 1);
        let mut hero = player();
        let mut log = EventLog::new();

        let outcome = battle
            .play_round(
                &mut hero,
                PlayerAction::Attack { target },
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        // 5 + 3 * 1 + 2 * 1, scaled by the midpoint factor
        assert_eq!(outcome, RoundOutcome::Victory { reward: 10.0 });
        assert_eq!(hero.gold(), 60.0);
        assert!(battle.is_over());
    }

    #[test]
    fn test_reward_grows_with_stage_and_level() {
        let low = vec![Enemy::new("Ember Imp", EnemyKind::Flaming, 1)];
        let high = vec![
            Enemy::new("Ember Imp", EnemyKind::Flaming, 3),
            Enemy::new("Frost Wisp", EnemyKind::Chilling, 3),
        ];
        let mut dice = FixedDice::never().with_fraction(0.0);

        let low_reward = victory_reward(&low, 1, &mut dice);
        let high_reward = victory_reward(&high, 3, &mut dice);

        assert!(low_reward > 0.0);
        assert!(high_reward > low_reward);
    }

    #[test]
    fn test_stale_target_is_rejected() {
        let mut battle = Battle::new(vec![Enemy::new("Ember Imp", EnemyKind::Flaming, 1)], 1);
        let mut hero = player();
        let mut log = EventLog::new();
        let ghost = EntityId::new();

        let result = battle.play_round(
            &mut hero,
            PlayerAction::Attack { target: ghost },
            &mut FixedDice::never(),
            &mut log,
        );

        assert_eq!(result, Err(BattleError::StaleTarget(ghost)));
        assert_eq!(battle.round(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_invalid_selection_is_rejected() {
        let mut battle = Battle::new(vec![Enemy::new("Ember Imp", EnemyKind::Flaming, 1)], 1);
        let mut hero = player();
        hero.store_ingredient(Ingredient::new("Sunpetal", IngredientKind::Healing, 1));

        let result = battle.play_round(
            &mut hero,
            PlayerAction::Potion {
                ingredients: vec![0, 0],
                target: Target::Player,
            },
            &mut FixedDice::never(),
            &mut EventLog::new(),
        );

        assert_eq!(result, Err(BattleError::DuplicateSelection { index: 0 }));
        assert_eq!(hero.ingredients().len(), 1);
    }

    #[test]
    fn test_frozen_player_keeps_ingredients() {
        let mut battle = Battle::new(vec![Enemy::new("Ember Imp", EnemyKind::Flaming, 1)], 1);
        let mut hero = player();
        hero.store_ingredient(Ingredient::new("Sunpetal", IngredientKind::Healing, 1));
        hero.entity.apply_status_effect(StatusEffect::freeze(1, 1));
        let mut log = EventLog::new();

        battle
            .play_round(
                &mut hero,
                PlayerAction::Potion {
                    ingredients: vec![0],
                    target: Target::Player,
                },
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        assert_eq!(hero.ingredients().len(), 1);
        assert!(log.events().contains(&BattleEvent::Skipped {
            name: "Tester".into()
        }));
        // The one-turn freeze expired during the player's own effect pass.
        assert!(hero.entity.status_effects().is_empty());
    }

    #[test]
    fn test_potion_stops_when_target_dies() {
        let enemy = Enemy::new("Ember Imp", EnemyKind::Flaming, 1);
        let survivor = Enemy::new("Frost Wisp", EnemyKind::Chilling, 1);
        let target = enemy.entity.id;
        let mut battle = Battle::new(vec![enemy, survivor], 1);
        let mut hero = player();
        hero.store_ingredient(Ingredient::new("Gravebloom", IngredientKind::Withering, 6));
        hero.store_ingredient(Ingredient::new("Ember Root", IngredientKind::Flaming, 1));
        let mut log = EventLog::new();

        battle
            .play_round(
                &mut hero,
                PlayerAction::Potion {
                    ingredients: vec![0, 1],
                    target: Target::Enemy(target),
                },
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        assert!(hero.ingredients().is_empty());
        assert_eq!(battle.defeated()[0].name(), "Ember Imp");
        let hits = log
            .events()
            .iter()
            .filter(|e| {
                matches!(e, BattleEvent::HealthChanged { target, .. } if target == "Ember Imp")
            })
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_scrambled_attack_is_narrated_as_healing() {
        let mut enemy = Enemy::new("Ember Imp", EnemyKind::Flaming, 1);
        enemy.entity = enemy.entity.with_health(30.0);
        let target = enemy.entity.id;
        let mut battle = Battle::new(vec![enemy], 1);
        let mut hero = player();
        hero.entity.apply_status_effect(StatusEffect::confusion(2, 1));
        let mut log = EventLog::new();

        // The scramble lands on the low end, turning 15 damage into -15.
        battle
            .play_round(
                &mut hero,
                PlayerAction::Attack { target },
                &mut FixedDice::never().with_fraction(0.0),
                &mut log,
            )
            .unwrap();

        assert!(log.events().iter().any(|e| match e {
            BattleEvent::HealthChanged { target, delta, .. } => {
                target == "Ember Imp" && *delta > 0.0
            }
            _ => false,
        }));
        assert!(!log
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Attacked { attacker, .. } if attacker == "Tester")));
        assert!(battle.roster()[0].entity.health() > 30.0);
    }

    #[test]
    fn test_self_potion_heals_player() {
        let mut battle = Battle::new(vec![Enemy::new("Motley Fool", EnemyKind::Joker, 1)], 1);
        let mut hero = player();
        hero.entity = hero.entity.clone().with_health(40.0);
        hero.store_ingredient(Ingredient::new("Sunpetal", IngredientKind::Healing, 2));

        battle
            .play_round(
                &mut hero,
                PlayerAction::Potion {
                    ingredients: vec![0],
                    target: Target::Player,
                },
                &mut FixedDice::never(),
                &mut EventLog::new(),
            )
            .unwrap();

        // The joker only confuses, so the heal is all that moved health.
        assert_eq!(hero.entity.health(), 80.0);
        assert_eq!(hero.entity.status_effects()[0], StatusEffect::confusion(2, 1));
    }

    #[test]
    fn test_frozen_enemy_skips() {
        let mut enemy = Enemy::new("Nightshade Wretch", EnemyKind::Poisonous, 1);
        enemy.entity.apply_status_effect(StatusEffect::freeze(2, 1));
        let mut battle = Battle::new(vec![enemy], 1);
        let mut hero = player();
        let mut log = EventLog::new();

        battle
            .play_round(
                &mut hero,
                PlayerAction::Potion {
                    ingredients: vec![],
                    target: Target::Player,
                },
                &mut FixedDice::never(),
                &mut log,
            )
            .unwrap();

        assert_eq!(hero.entity.health(), 100.0);
        assert!(log.events().contains(&BattleEvent::Skipped {
            name: "Nightshade Wretch".into()
        }));
        assert_eq!(battle.roster()[0].entity.health(), 59.0);
    }
}
