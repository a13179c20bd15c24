//! # Battle Core
//!
//! The engine of the potion maker. This crate drives `potion_rules` through
//! encounters: it decides what enemies do, sequences rounds, sweeps the
//! dead and carries the run from stage to stage.
//!
//! ## Core Components
//!
//! - **behavior**: Per-kind enemy decision policy
//! - **battle**: The round state machine and death sweeps
//! - **events**: Narration events and the sinks that receive them
//! - **factory** / **names**: Stage-scaled enemy and ingredient generation
//! - **session**: Stage progression, rewards and the shop
//! - **config**: TOML configuration for a session
//!
//! ## Design Philosophy
//!
//! - **Explicit Randomness**: Every random branch draws from a caller-supplied source
//! - **One-Way Output**: The engine emits events and never reads them back
//! - **Ids, Not References**: Targets are named by id and re-checked before use

pub mod battle;
pub mod behavior;
pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod names;
pub mod session;

pub use battle::*;
pub use behavior::{decide, EnemyAction, Target};
pub use config::*;
pub use error::*;
pub use events::*;
pub use session::*;
