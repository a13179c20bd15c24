//! The ingredient shop between battles.

use serde::{Deserialize, Serialize};

use potion_rules::{Ingredient, Player, RandomSource};

use crate::config::ShopConfig;
use crate::error::{BattleError, SessionError};
use crate::factory;

/// Price of an ingredient: a flat fee plus a random rate per point of potency.
pub fn price_for(potency: i32, dice: &mut dyn RandomSource) -> f64 {
    10.0 + potency as f64 * dice.real_in(8.0, 15.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub ingredient: Ingredient,
    pub price: f64,
}

impl std::fmt::Display for ShopItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] - {:.2} gold",
            self.ingredient,
            self.ingredient.kind().title(),
            self.price
        )
    }
}

/// Result of a purchase attempt. Running short on gold is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Purchase {
    Bought { name: String, price: f64 },
    NotEnoughGold { price: f64, gold: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    items: Vec<ShopItem>,
    stage: u32,
    min_items: usize,
    max_items: usize,
}

impl Shop {
    /// An empty shop. Call `restock` before opening it.
    pub fn new(config: &ShopConfig) -> Self {
        Self {
            items: Vec::new(),
            stage: 1,
            min_items: config.min_items,
            max_items: config.max_items.max(config.min_items),
        }
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Replace the whole stock with fresh items for `stage`.
    pub fn restock(&mut self, stage: u32, dice: &mut dyn RandomSource) -> Result<(), BattleError> {
        self.stage = stage;
        let count = dice.int_in(self.min_items as i32, self.max_items as i32).max(0) as usize;
        self.items = (0..count)
            .map(|_| Self::stock_item(stage, dice))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(stage, items = self.items.len(), "shop restocked");
        Ok(())
    }

    /// Buy the item in `index`, moving it into the player's satchel.
    ///
    /// The emptied slot is refilled straight away.
    pub fn buy(
        &mut self,
        index: usize,
        player: &mut Player,
        dice: &mut dyn RandomSource,
    ) -> Result<Purchase, SessionError> {
        let len = self.items.len();
        let price = self
            .items
            .get(index)
            .map(|item| item.price)
            .ok_or(SessionError::InvalidShopIndex { index, len })?;

        let fresh = Self::stock_item(self.stage, dice)?;
        if !player.spend_gold(price) {
            return Ok(Purchase::NotEnoughGold {
                price,
                gold: player.gold(),
            });
        }
        let sold = std::mem::replace(&mut self.items[index], fresh);
        let name = sold.ingredient.name().to_string();
        player.store_ingredient(sold.ingredient);
        tracing::debug!(%name, price, gold = player.gold(), "ingredient bought");

        Ok(Purchase::Bought { name, price })
    }

    fn stock_item(stage: u32, dice: &mut dyn RandomSource) -> Result<ShopItem, BattleError> {
        let ingredient = factory::shop_ingredient(stage, dice)?;
        let price = price_for(ingredient.potency(), dice);
        Ok(ShopItem { ingredient, price })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potion_rules::{FixedDice, GameRng};

    fn stocked(dice: &mut dyn RandomSource) -> Shop {
        let mut shop = Shop::new(&ShopConfig::default());
        shop.restock(2, dice).unwrap();
        shop
    }

    #[test]
    fn test_price_formula() {
        assert_eq!(price_for(2, &mut FixedDice::never().with_fraction(0.0)), 26.0);
        assert_eq!(price_for(2, &mut FixedDice::never().with_fraction(1.0)), 40.0);
    }

    #[test]
    fn test_restock_size_and_potency() {
        let mut rng = GameRng::from_seed(5);
        for _ in 0..20 {
            let shop = stocked(&mut rng);
            assert!((6..=8).contains(&shop.items().len()));
            assert!(shop
                .items()
                .iter()
                .all(|item| (1..=3).contains(&item.ingredient.potency())));
        }
    }

    #[test]
    fn test_buy_moves_ingredient_and_refills_slot() {
        let mut dice = FixedDice::never();
        let mut shop = stocked(&mut dice);
        let mut player = Player::new("Tester", 100.0, 15.0, 100.0);
        let before = shop.items().len();
        let price = shop.items()[0].price;

        let purchase = shop.buy(0, &mut player, &mut dice).unwrap();

        assert!(matches!(purchase, Purchase::Bought { price: paid, .. } if paid == price));
        assert_eq!(player.ingredients().len(), 1);
        assert_eq!(player.gold(), 100.0 - price);
        assert_eq!(shop.items().len(), before);
    }

    #[test]
    fn test_buy_without_gold() {
        let mut dice = FixedDice::never();
        let mut shop = stocked(&mut dice);
        let mut player = Player::new("Tester", 100.0, 15.0, 0.0);

        let purchase = shop.buy(1, &mut player, &mut dice).unwrap();

        assert!(matches!(purchase, Purchase::NotEnoughGold { gold, .. } if gold == 0.0));
        assert!(player.ingredients().is_empty());
    }

    /// Rolls one past every table.
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
    fn test_failed_refill_keeps_gold() {
        let mut shop = stocked(&mut FixedDice::never());
        let mut player = Player::new("Tester", 100.0, 15.0, 100.0);
        let before = shop.items().to_vec();

        assert_eq!(
            shop.buy(0, &mut player, &mut OffTheTable).unwrap_err(),
            SessionError::Battle(BattleError::UnknownKind { index: 10 })
        );
        assert_eq!(player.gold(), 100.0);
        assert!(player.ingredients().is_empty());
        assert_eq!(shop.items(), &before[..]);
    }

    #[test]
    fn test_buy_bad_index() {
        let mut dice = FixedDice::never();
        let mut shop = stocked(&mut dice);
        let mut player = Player::new("Tester", 100.0, 15.0, 100.0);
        let len = shop.items().len();

        assert_eq!(
            shop.buy(len, &mut player, &mut dice).unwrap_err(),
            SessionError::InvalidShopIndex { index: len, len }
        );
    }
}
