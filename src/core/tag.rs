//! Sparse per-unit counters ("tags").
//!
//! A tag is a named integer modifier attached to a unit: damage accrued,
//! poison stacks, a power bonus, the death flag. The store keeps at most
//! one counter per kind; an absent kind reads as 0.
//!
//! `bump` is the only mutation path. Reads never detach and never insert.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{EngineError, EngineResult};

/// Enumerated tag kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    /// Nonzero means the unit is dead. Tracked independently of hp; the
    /// action author is responsible for keeping both in agreement.
    Dead,
    /// Poison stacks.
    Poison,
    /// Current (buffed) power. Strike damage is attributed to a leader's
    /// `Power` tag, not to any unit's static power field.
    Power,
    /// Damage accrued.
    Damage,
    /// Nonzero means the unit is incapacitated and cannot act.
    Stun,
}

/// A single tag counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub kind: TagKind,
    pub value: i64,
}

/// Ordered sparse store of counters, unique by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStore {
    counters: SmallVec<[Counter; 4]>,
}

impl TagStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counters present (bumped at least once).
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Read a counter's value. Absent kinds read as 0.
    #[must_use]
    pub fn value(&self, kind: TagKind) -> i64 {
        self.counters
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.value)
    }

    /// Add `delta` to the counter for `kind`, inserting it on first bump.
    /// Returns the resulting value.
    ///
    /// A zero delta is rejected with `InvalidArgument`: zero-delta exists
    /// only as a read, which must use [`TagStore::value`].
    pub fn bump(&mut self, kind: TagKind, delta: i64) -> EngineResult<i64> {
        if delta == 0 {
            return Err(EngineError::InvalidArgument(
                "zero-delta bump; use the read accessor instead".to_string(),
            ));
        }
        if let Some(counter) = self.counters.iter_mut().find(|c| c.kind == kind) {
            counter.value += delta;
            return Ok(counter.value);
        }
        self.counters.push(Counter { kind, value: delta });
        Ok(delta)
    }

    /// Iterate counters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Counter> {
        self.counters.iter()
    }
}
