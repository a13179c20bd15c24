//! The player: an entity with a purse and an ingredient satchel.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::error::RulesError;
use crate::ingredients::Ingredient;
use crate::mechanics::{Element, HealthSource};

/// The player character. Persists across battles and stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
    gold: f64,
    inventory: Vec<Ingredient>,
}

impl Player {
    /// Create a player with an empty satchel.
    pub fn new(name: impl Into<String>, max_health: f64, damage: f64, gold: f64) -> Self {
        Self {
            entity: Entity::new(name, Element::Neutral, max_health, damage),
            gold,
            inventory: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn add_gold(&mut self, gold: f64) {
        self.gold += gold;
    }

    /// Spend gold if the purse allows it.
    pub fn spend_gold(&mut self, gold: f64) -> bool {
        if self.gold < gold {
            return false;
        }
        self.gold -= gold;
        true
    }

    pub fn store_ingredient(&mut self, ingredient: Ingredient) {
        self.inventory.push(ingredient);
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.inventory
    }

    /// Check a selection against the satchel without moving anything.
    pub fn check_selection(&self, selection: &[usize]) -> Result<(), RulesError> {
        let len = self.inventory.len();
        for (position, &index) in selection.iter().enumerate() {
            if index >= len {
                return Err(RulesError::InvalidSelection { index, len });
            }
            if selection[..position].contains(&index) {
                return Err(RulesError::DuplicateSelection { index });
            }
        }
        Ok(())
    }

    /// Remove the selected ingredients from the satchel.
    ///
    /// The whole selection is validated before anything moves, and the
    /// ingredients come back in selection order.
    pub fn take_ingredients(&mut self, selection: &[usize]) -> Result<Vec<Ingredient>, RulesError> {
        self.check_selection(selection)?;

        let mut slots: Vec<Option<Ingredient>> = self.inventory.drain(..).map(Some).collect();
        let taken = selection
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect();
        self.inventory = slots.into_iter().flatten().collect();

        Ok(taken)
    }

    /// This player as the cause of a health change.
    pub fn source(&self) -> HealthSource {
        HealthSource::Player {
            name: self.entity.name().to_string(),
        }
    }
}
