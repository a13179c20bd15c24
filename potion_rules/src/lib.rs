//! # Potion Rules
//!
//! The rules crate for the potion maker - entities, status effects,
//! ingredients and the randomness they draw on.
//! Nothing in here drives a battle; it only answers what happens when a
//! potion lands or a turn passes.

pub mod effects;
pub mod entities;
pub mod error;
pub mod ingredients;
pub mod mechanics;

pub use effects::*;
pub use entities::*;
pub use error::*;
pub use ingredients::*;
pub use mechanics::*;
