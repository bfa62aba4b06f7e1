//! # skirmish
//!
//! A turn-based combat simulation core built around cheap state branching.
//!
//! ## Design Principles
//!
//! 1. **Copy-On-Write State**: Every sub-structure of [`GameState`] is a
//!    shared reference; cloning a state is O(1) and mutations detach only
//!    the container they touch. Whether a detach copied is never observable.
//!
//! 2. **One Queue For All Side Effects**: Attacks, tag bumps, spawn hooks,
//!    played cards, and scripted behaviors all enqueue plans on the same
//!    FIFO, drained to fixed point by `process_triggers`.
//!
//! 3. **Pluggable Determinism**: Randomness goes through the [`RngSource`]
//!    trait; the RNG itself is versioned copy-on-write, so branched states
//!    replay identically.
//!
//! ## Modules
//!
//! - `core`: Game state, teams, units, tags, card zones, RNG, errors
//! - `abilities`: Trigger keys and per-unit ability tables
//! - `actions`: The closed set of scripted effects plans can run
//! - `content`: Unit classes, rooms, and item cards
//! - `driver`: Turn loop and room entry

pub mod abilities;
pub mod actions;
pub mod content;
pub mod core;
pub mod driver;

// Re-export commonly used types
pub use crate::abilities::{Ability, AbilityTable, Trigger, TriggerCategory};
pub use crate::actions::Action;
pub use crate::content::{ClassRegistry, Room, RoomKind, UnitClass, UnitClassId};
pub use crate::core::{
    Card, ChaChaSource, Counter, CounterRng, EngineError, EngineResult, GameState, Pile, Plan,
    RngSource, Rotate, Side, TagKind, TagStore, Team, Unit, DEFAULT_PLAN_BUDGET,
};
pub use crate::driver::Decider;
