//! Core simulation state and its copy-on-write building blocks.

pub mod card;
pub mod error;
pub mod rng;
pub mod state;
pub mod tag;
pub mod team;
pub mod unit;
pub mod zone;

pub use card::Card;
pub use error::{EngineError, EngineResult};
pub use rng::{ChaChaSource, CounterRng, RngSource};
pub use state::{GameState, Plan, DEFAULT_PLAN_BUDGET};
pub use tag::{Counter, TagKind, TagStore};
pub use team::{Rotate, Side, Team};
pub use unit::Unit;
pub use zone::Pile;
