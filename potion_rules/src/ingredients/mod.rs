//! Ingredients: single-use consumables thrown at a target inside a potion.

use serde::{Deserialize, Serialize};

use crate::effects::StatusEffect;
use crate::entities::Entity;
use crate::error::RulesError;
use crate::mechanics::{Consequence, Element, HealthSource, RandomSource};

/// Behavior kind of an ingredient, mirroring the status effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientKind {
    Flaming,
    Chilling,
    Poisonous,
    Withering,
    Healing,
    Regenerative,
    Protective,
    Strengthening,
    Cleansing,
    Chaos,
}

impl IngredientKind {
    pub const ALL: [IngredientKind; 10] = [
        IngredientKind::Flaming,
        IngredientKind::Chilling,
        IngredientKind::Poisonous,
        IngredientKind::Withering,
        IngredientKind::Healing,
        IngredientKind::Regenerative,
        IngredientKind::Protective,
        IngredientKind::Strengthening,
        IngredientKind::Cleansing,
        IngredientKind::Chaos,
    ];

    pub fn element(&self) -> Element {
        match self {
            IngredientKind::Flaming => Element::Fire,
            IngredientKind::Chilling => Element::Ice,
            IngredientKind::Poisonous => Element::Nature,
            IngredientKind::Withering => Element::Underworld,
            IngredientKind::Healing => Element::Healing,
            IngredientKind::Regenerative => Element::Regenerating,
            IngredientKind::Protective => Element::Protective,
            IngredientKind::Strengthening => Element::Strengthening,
            IngredientKind::Cleansing => Element::Purifying,
            IngredientKind::Chaos => Element::Chaos,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            IngredientKind::Flaming => "Flaming Ingredient",
            IngredientKind::Chilling => "Chilling Ingredient",
            IngredientKind::Poisonous => "Poisonous Ingredient",
            IngredientKind::Withering => "Withering Ingredient",
            IngredientKind::Healing => "Healing Ingredient",
            IngredientKind::Regenerative => "Regenerative Ingredient",
            IngredientKind::Protective => "Protective Ingredient",
            IngredientKind::Strengthening => "Strengthening Ingredient",
            IngredientKind::Cleansing => "Cleansing Ingredient",
            IngredientKind::Chaos => "Chaos Ingredient",
        }
    }
}

/// A single-use consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    name: String,
    kind: IngredientKind,
    potency: i32,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, kind: IngredientKind, potency: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            potency,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> IngredientKind {
        self.kind
    }

    pub fn potency(&self) -> i32 {
        self.potency
    }

    /// This ingredient as the cause of a health change.
    pub fn source(&self) -> HealthSource {
        HealthSource::Ingredient {
            name: self.name.clone(),
            kind: self.kind,
            potency: self.potency,
        }
    }

    /// Multi-line description for the satchel and shop screens.
    pub fn describe(&self) -> String {
        format!(
            "[ ( Ingredient : {} ) ]\n* Kind: {}\n* Element: {}\n* Potency: {}\n",
            self.name,
            self.kind.title(),
            self.kind.element(),
            self.potency
        )
    }

    /// Apply the ingredient to a target, consuming it.
    ///
    /// Offensive kinds strike immediately and may attach their matching
    /// effect; supportive kinds heal or attach a beneficial effect. Chaos rolls
    /// one of five outcomes uniformly.
    pub fn apply(
        self,
        target: &mut Entity,
        dice: &mut dyn RandomSource,
    ) -> Result<Vec<Consequence>, RulesError> {
        let p = self.potency;
        let pf = p as f64;
        let mut throw = Throw {
            target,
            source: self.source(),
            consequences: Vec::new(),
        };

        match self.kind {
            IngredientKind::Flaming => {
                throw.health(-15.0 * pf, dice);
                if dice.one_in(3) {
                    throw.afflict(StatusEffect::burn(3 * p, p * 3 / 2));
                } else {
                    throw.miss();
                }
            }
            IngredientKind::Chilling => {
                throw.health(-5.0 * pf, dice);
                if dice.one_in(5) {
                    throw.afflict(StatusEffect::freeze(p, p));
                } else if dice.one_in(2) {
                    throw.afflict(StatusEffect::freeze(1, 1));
                } else {
                    throw.miss();
                }
            }
            IngredientKind::Poisonous => {
                throw.health(-8.0 * pf, dice);
                if !dice.one_in(4) {
                    throw.afflict(StatusEffect::poison(4 * p, p));
                } else {
                    throw.miss();
                }
            }
            IngredientKind::Withering => {
                throw.health(-10.0 * pf, dice);
                if dice.one_in(3) {
                    throw.afflict(StatusEffect::wither(2 * p, 2 * p));
                } else {
                    throw.miss();
                }
            }
            IngredientKind::Healing => {
                throw.health(20.0 * pf, dice);
            }
            IngredientKind::Regenerative => {
                throw.afflict(StatusEffect::regeneration(3 * p, p));
                throw.health(5.0 * pf, dice);
            }
            IngredientKind::Protective => {
                throw.afflict(StatusEffect::protection(3 * p, p));
                let bolster = 0.1 * pf * throw.target.max_health();
                throw.health(bolster, dice);
            }
            IngredientKind::Strengthening => {
                throw.afflict(StatusEffect::strength(2 * p, p));
            }
            IngredientKind::Cleansing => {
                let removed = throw.target.clear_status_effects();
                throw.consequences.push(Consequence::Cleansed { removed });
                if removed > 0 {
                    throw.health(5.0 * pf, dice);
                }
            }
            IngredientKind::Chaos => match dice.int_in(1, 5) {
                1 => throw.afflict(StatusEffect::burn(5 * p, 2 * p)),
                2 => throw.afflict(StatusEffect::freeze(3 * p, 2 * p)),
                3 => throw.health(30.0 * pf, dice),
                4 => {
                    let swing = dice.real_in(-20.0, 20.0) * pf;
                    throw.health(swing, dice);
                }
                5 => throw.health(-25.0 * pf, dice),
                roll => return Err(RulesError::UnknownOutcome { roll }),
            },
        }

        Ok(throw.consequences)
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Potency: {})", self.name, self.potency)
    }
}

/// Accumulates what one ingredient did to its target.
struct Throw<'a> {
    target: &'a mut Entity,
    source: HealthSource,
    consequences: Vec<Consequence>,
}

impl Throw<'_> {
    fn health(&mut self, amount: f64, dice: &mut dyn RandomSource) {
        let delta = self.target.modify_health(amount, &self.source, dice);
        self.consequences.push(Consequence::HealthChanged {
            delta,
            source: self.source.clone(),
        });
    }

    fn afflict(&mut self, effect: StatusEffect) {
        self.target.apply_status_effect(effect);
        self.consequences.push(Consequence::Afflicted { effect });
    }

    fn miss(&mut self) {
        self.consequences.push(Consequence::NoEffect);
    }
}
