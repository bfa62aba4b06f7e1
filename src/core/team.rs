//! Teams: ordered unit collections with wrapping indices.
//!
//! Index 0 is the leader. Indices are taken modulo team size everywhere, so
//! "hit N units starting here" logic cycles instead of erroring; only an
//! empty team is an error.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::unit::Unit;

/// Which side of the battlefield a team is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Direction for reordering a unit sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotate {
    Left,
    Right,
}

/// An ordered collection of units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Team {
    units: Vector<Arc<Unit>>,
}

impl Team {
    /// Index of the leader.
    pub const LEADER: usize = 0;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_units(units: impl IntoIterator<Item = Unit>) -> Self {
        Self {
            units: units.into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Append a unit at the end of the order.
    pub fn push(&mut self, unit: Unit) {
        self.units.push_back(Arc::new(unit));
    }

    /// Borrow the unit at `idx`, wrapping modulo team size.
    pub fn unit(&self, idx: usize) -> EngineResult<&Unit> {
        if self.units.is_empty() {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        let idx = idx % self.units.len();
        self.units
            .get(idx)
            .map(Arc::as_ref)
            .ok_or(EngineError::PreconditionViolated("team has no units"))
    }

    /// Detach the unit at `idx` for mutation, wrapping modulo team size.
    pub fn unit_detach(&mut self, idx: usize) -> EngineResult<&mut Unit> {
        if self.units.is_empty() {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        let idx = idx % self.units.len();
        let slot = self
            .units
            .get_mut(idx)
            .ok_or(EngineError::PreconditionViolated("team has no units"))?;
        Ok(Arc::make_mut(slot))
    }

    /// Rotate the unit order by `dist` positions. No-op for teams smaller
    /// than two units.
    pub fn rotate(&mut self, dir: Rotate, dist: usize) {
        if self.units.len() < 2 {
            return;
        }
        for _ in 0..dist {
            match dir {
                Rotate::Left => {
                    if let Some(front) = self.units.pop_front() {
                        self.units.push_back(front);
                    }
                }
                Rotate::Right => {
                    if let Some(back) = self.units.pop_back() {
                        self.units.push_front(back);
                    }
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().map(Arc::as_ref)
    }
}
