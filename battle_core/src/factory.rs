//! Stage-scaled factories for enemies and ingredients.

use potion_rules::{Enemy, EnemyKind, Ingredient, IngredientKind, RandomSource};

use crate::error::BattleError;
use crate::names;

/// Number of enemies in a stage's roster.
pub fn roster_size(stage: u32) -> usize {
    1 + stage.saturating_sub(1) as usize / 2
}

pub fn enemy_kind(index: usize) -> Result<EnemyKind, BattleError> {
    EnemyKind::ALL
        .get(index)
        .copied()
        .ok_or(BattleError::UnknownKind { index })
}

pub fn ingredient_kind(index: usize) -> Result<IngredientKind, BattleError> {
    IngredientKind::ALL
        .get(index)
        .copied()
        .ok_or(BattleError::UnknownKind { index })
}

/// A random enemy at the stage's level.
pub fn generate_enemy(stage: u32, dice: &mut dyn RandomSource) -> Result<Enemy, BattleError> {
    let kind = enemy_kind(dice.index_below(EnemyKind::ALL.len()))?;
    let name = pick(names::enemy_names(kind), dice)?;
    Ok(Enemy::new(name, kind, stage.max(1)))
}

/// The full roster for a stage, in acting order.
pub fn generate_roster(stage: u32, dice: &mut dyn RandomSource) -> Result<Vec<Enemy>, BattleError> {
    let roster = (0..roster_size(stage))
        .map(|_| generate_enemy(stage, dice))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(stage, size = roster.len(), "roster generated");
    Ok(roster)
}

/// A random ingredient with potency in `[min_potency, max_potency]`.
pub fn generate_ingredient(
    min_potency: i32,
    max_potency: i32,
    dice: &mut dyn RandomSource,
) -> Result<Ingredient, BattleError> {
    let kind = ingredient_kind(dice.index_below(IngredientKind::ALL.len()))?;
    let potency = dice.int_in(min_potency, max_potency);
    let name = pick(names::ingredient_names(kind), dice)?;
    Ok(Ingredient::new(name, kind, potency))
}

/// Starting kit ingredients are a little stronger than the stage.
pub fn starting_ingredient(
    stage: u32,
    dice: &mut dyn RandomSource,
) -> Result<Ingredient, BattleError> {
    let stage = stage as i32;
    generate_ingredient(stage, stage + 3, dice)
}

pub fn shop_ingredient(stage: u32, dice: &mut dyn RandomSource) -> Result<Ingredient, BattleError> {
    generate_ingredient(1, stage as i32 + 1, dice)
}

fn pick(
    table: &'static [&'static str],
    dice: &mut dyn RandomSource,
) -> Result<&'static str, BattleError> {
    let index = dice.index_below(table.len());
    table
        .get(index)
        .copied()
        .ok_or(BattleError::UnknownKind { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use potion_rules::{FixedDice, GameRng};

    struct OffTheTable;

    impl RandomSource for OffTheTable {
        fn int_in(&mut self, _min: i32, max: i32) -> i32 {
            max
        }

        fn real_in(&mut self, _min: f64, max: f64) -> f64 {
            max
        }

        fn index_below(&mut self, len: usize) -> usize {
            len
        }
    }

    #[test]
    fn test_roster_size_grows_every_other_stage() {
        assert_eq!(roster_size(1), 1);
        assert_eq!(roster_size(2), 1);
        assert_eq!(roster_size(3), 2);
        assert_eq!(roster_size(6), 3);
        assert_eq!(roster_size(0), 1);
    }

    #[test]
    fn test_generated_enemy_matches_stage() {
        let enemy = generate_enemy(4, &mut FixedDice::never().with_fraction(0.0)).unwrap();

        assert_eq!(enemy.kind(), EnemyKind::Flaming);
        assert_eq!(enemy.level(), 4);
        assert_eq!(enemy.name(), "Ember Imp");
        assert_eq!(enemy.entity.max_health(), 90.0);
    }

    #[test]
    fn test_roster_is_seeded() {
        let a = generate_roster(5, &mut GameRng::from_seed(11)).unwrap();
        let b = generate_roster(5, &mut GameRng::from_seed(11)).unwrap();

        assert_eq!(a.len(), 3);
        let names = |roster: &[Enemy]| {
            roster
                .iter()
                .map(|e| e.name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_potency_ranges() {
        let mut rng = GameRng::from_seed(3);
        for _ in 0..50 {
            let kit = starting_ingredient(2, &mut rng).unwrap();
            assert!((2..=5).contains(&kit.potency()));

            let stock = shop_ingredient(2, &mut rng).unwrap();
            assert!((1..=3).contains(&stock.potency()));
        }
    }

    #[test]
    fn test_out_of_range_roll_is_unknown_kind() {
        assert_eq!(
            generate_enemy(1, &mut OffTheTable).unwrap_err(),
            BattleError::UnknownKind { index: 10 }
        );
        assert_eq!(
            shop_ingredient(1, &mut OffTheTable).unwrap_err(),
            BattleError::UnknownKind { index: 10 }
        );
    }
}
