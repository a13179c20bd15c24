//! The game session - the player's run across stages.

mod shop;

pub use shop::*;

use potion_rules::{GameRng, Player};

use crate::battle::{Battle, PlayerAction, RoundOutcome};
use crate::config::GameConfig;
use crate::error::SessionError;
use crate::events::{BattleEvent, EventSink};
use crate::factory;

/// Health restored every third stage reached.
pub const STAGE_HEAL: f64 = 25.0;

/// Owns everything that persists between battles.
#[derive(Debug)]
pub struct GameSession {
    player: Player,
    stage: u32,
    shop: Shop,
    rng: GameRng,
    game_over: bool,
}

impl GameSession {
    /// Start a run: seed the generator, hand out the starting kit and stock
    /// the shop for stage 1.
    pub fn new(config: &GameConfig) -> Result<Self, SessionError> {
        let mut rng = match config.seed {
            Some(seed) => GameRng::from_seed(seed),
            None => GameRng::from_entropy(),
        };

        let mut player = Player::new(
            config.player.name.clone(),
            config.player.max_health,
            config.player.damage,
            config.player.gold,
        );
        let stage = 1;
        for _ in 0..config.starting_ingredients {
            player.store_ingredient(factory::starting_ingredient(stage, &mut rng)?);
        }

        let mut shop = Shop::new(&config.shop);
        shop.restock(stage, &mut rng)?;

        tracing::info!(player = %player.name(), seed = ?rng.seed(), "session started");
        Ok(Self {
            player,
            stage,
            shop,
            rng,
            game_over: false,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    /// Build this stage's roster and open the encounter.
    pub fn start_battle(
        &mut self,
        sink: &mut dyn EventSink,
    ) -> Result<Encounter<'_>, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        let roster = factory::generate_roster(self.stage, &mut self.rng)?;
        let battle = Battle::new(roster, self.stage);
        battle.announce(sink);
        Ok(Encounter {
            session: self,
            battle,
        })
    }

    pub fn buy(&mut self, index: usize) -> Result<Purchase, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        self.shop.buy(index, &mut self.player, &mut self.rng)
    }

    /// Apply a finished battle to the run.
    fn conclude(
        &mut self,
        outcome: RoundOutcome,
        sink: &mut dyn EventSink,
    ) -> Result<(), SessionError> {
        match outcome {
            RoundOutcome::Ongoing => {}
            RoundOutcome::Victory { .. } => {
                self.stage += 1;
                tracing::info!(stage = self.stage, "stage advanced");
                sink.emit(BattleEvent::StageAdvanced { stage: self.stage });

                if self.stage % 3 == 0 {
                    let source = self.player.source();
                    let healed = self
                        .player
                        .entity
                        .modify_health(STAGE_HEAL, &source, &mut self.rng);
                    sink.emit(BattleEvent::Invigorated {
                        name: self.player.name().to_string(),
                        healed,
                    });
                }
                self.shop.restock(self.stage, &mut self.rng)?;
            }
            RoundOutcome::Defeat | RoundOutcome::Surrendered => {
                tracing::info!(stage = self.stage, ?outcome, "session over");
                self.game_over = true;
            }
        }
        Ok(())
    }
}

/// A battle in progress, borrowing the session until it ends.
pub struct Encounter<'a> {
    session: &'a mut GameSession,
    battle: Battle,
}

impl Encounter<'_> {
    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn player(&self) -> &Player {
        &self.session.player
    }

    pub fn is_over(&self) -> bool {
        self.battle.is_over()
    }

    /// Play one round; a terminal outcome is applied to the session.
    pub fn play_round(
        &mut self,
        action: PlayerAction,
        sink: &mut dyn EventSink,
    ) -> Result<RoundOutcome, SessionError> {
        let session = &mut *self.session;
        let outcome = self
            .battle
            .play_round(&mut session.player, action, &mut session.rng, sink)?;
        if outcome.is_terminal() {
            session.conclude(outcome, sink)?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Target;
    use crate::events::EventLog;

    fn seeded(seed: u64) -> GameSession {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        GameSession::new(&config).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = seeded(1);

        assert_eq!(session.stage(), 1);
        assert_eq!(session.seed(), Some(1));
        assert_eq!(session.player().ingredients().len(), 3);
        assert!(session
            .player()
            .ingredients()
            .iter()
            .all(|i| (1..=4).contains(&i.potency())));
        assert!((6..=8).contains(&session.shop().items().len()));
        assert!(!session.is_over());
    }

    #[test]
    fn test_victory_advances_stage_and_heals_every_third() {
        let mut session = seeded(2);
        session.player.entity = session.player.entity.clone().with_health(50.0);
        let mut log = EventLog::new();

        session
            .conclude(RoundOutcome::Victory { reward: 10.0 }, &mut log)
            .unwrap();
        assert_eq!(session.stage(), 2);
        assert_eq!(session.player().entity.health(), 50.0);
        assert_eq!(session.shop().stage(), 2);

        session
            .conclude(RoundOutcome::Victory { reward: 10.0 }, &mut log)
            .unwrap();
        assert_eq!(session.stage(), 3);
        assert_eq!(session.player().entity.health(), 75.0);
        assert!(log.events().contains(&BattleEvent::Invigorated {
            name: "Alchemist".into(),
            healed: 25.0,
        }));
    }

    #[test]
    fn test_defeat_ends_session() {
        let mut session = seeded(3);
        session
            .conclude(RoundOutcome::Defeat, &mut EventLog::new())
            .unwrap();

        assert!(session.is_over());
        assert!(matches!(
            session.start_battle(&mut EventLog::new()),
            Err(SessionError::GameOver)
        ));
        assert_eq!(session.buy(0), Err(SessionError::GameOver));
    }

    #[test]
    fn test_surrender_keeps_stage_and_gold() {
        let mut session = seeded(4);
        let gold = session.player().gold();
        let mut log = EventLog::new();

        let mut encounter = session.start_battle(&mut log).unwrap();
        let outcome = encounter
            .play_round(PlayerAction::Surrender, &mut log)
            .unwrap();
        assert_eq!(outcome, RoundOutcome::Surrendered);

        assert_eq!(session.stage(), 1);
        assert_eq!(session.player().gold(), gold);
        assert!(session.is_over());
    }

    #[test]
    fn test_first_stage_victory_with_overwhelming_damage() {
        let mut config = GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        };
        config.player.damage = 1000.0;
        let mut session = GameSession::new(&config).unwrap();
        let gold = session.player().gold();
        let mut log = EventLog::new();

        let mut encounter = session.start_battle(&mut log).unwrap();
        assert_eq!(encounter.battle().roster().len(), 1);
        let target = encounter.battle().roster()[0].entity.id;
        let outcome = encounter
            .play_round(PlayerAction::Attack { target }, &mut log)
            .unwrap();

        assert!(matches!(outcome, RoundOutcome::Victory { reward } if reward > 0.0));
        assert_eq!(session.stage(), 2);
        assert!(session.player().gold() > gold);
        assert!(log
            .events()
            .contains(&BattleEvent::StageAdvanced { stage: 2 }));
    }

    #[test]
    fn test_buy_through_session() {
        let mut session = seeded(6);
        let before = session.player().ingredients().len();

        match session.buy(0).unwrap() {
            Purchase::Bought { .. } => {
                assert_eq!(session.player().ingredients().len(), before + 1)
            }
            Purchase::NotEnoughGold { .. } => {
                assert_eq!(session.player().ingredients().len(), before)
            }
        }
    }

    #[test]
    fn test_potion_on_self_through_encounter() {
        let mut session = seeded(7);
        let mut log = EventLog::new();
        let mut encounter = session.start_battle(&mut log).unwrap();

        let result = encounter.play_round(
            PlayerAction::Potion {
                ingredients: vec![0],
                target: Target::Player,
            },
            &mut log,
        );

        assert!(result.is_ok());
        assert_eq!(encounter.player().ingredients().len(), 2);
    }
}
