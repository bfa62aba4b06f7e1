//! Units: immutable snapshots with copy-on-write stores.
//!
//! A unit owns its hp and power fields directly; its tag store and ability
//! table are shared references detached on first mutation. hp may go
//! negative — nothing floors it, and nothing sets the `Dead` tag when it
//! crosses zero; the action author keeps the two in agreement.

use std::sync::Arc;

use crate::abilities::AbilityTable;
use crate::content::UnitClassId;

use super::error::{EngineError, EngineResult};
use super::tag::{TagKind, TagStore};

/// One combatant.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub hp: i64,
    pub power: i64,
    /// Class this unit was spawned from, if any. Used by the driver to look
    /// up scripted behavior.
    pub class: Option<UnitClassId>,
    tags: Option<Arc<TagStore>>,
    abilities: Option<Arc<AbilityTable>>,
}

impl Unit {
    /// A unit with initialized (empty) tag and ability stores.
    #[must_use]
    pub fn new(hp: i64, power: i64) -> Self {
        Self {
            hp,
            power,
            class: None,
            tags: Some(Arc::new(TagStore::new())),
            abilities: Some(Arc::new(AbilityTable::new())),
        }
    }

    /// A unit with unset stores; reading or detaching them fails with
    /// `NullState` until they are assigned.
    #[must_use]
    pub fn bare(hp: i64, power: i64) -> Self {
        Self {
            hp,
            power,
            class: None,
            tags: None,
            abilities: None,
        }
    }

    pub fn set_tags(&mut self, tags: TagStore) {
        self.tags = Some(Arc::new(tags));
    }

    pub fn set_abilities(&mut self, abilities: AbilityTable) {
        self.abilities = Some(Arc::new(abilities));
    }

    /// Borrow the tag store.
    pub fn tags(&self) -> EngineResult<&TagStore> {
        self.tags
            .as_deref()
            .ok_or(EngineError::NullState("unit tags"))
    }

    /// Detach the tag store for mutation.
    pub fn tags_detach(&mut self) -> EngineResult<&mut TagStore> {
        let arc = self
            .tags
            .as_mut()
            .ok_or(EngineError::NullState("unit tags"))?;
        Ok(Arc::make_mut(arc))
    }

    /// Borrow the ability table.
    pub fn abilities(&self) -> EngineResult<&AbilityTable> {
        self.abilities
            .as_deref()
            .ok_or(EngineError::NullState("unit abilities"))
    }

    /// Detach the ability table for mutation.
    pub fn abilities_detach(&mut self) -> EngineResult<&mut AbilityTable> {
        let arc = self
            .abilities
            .as_mut()
            .ok_or(EngineError::NullState("unit abilities"))?;
        Ok(Arc::make_mut(arc))
    }

    /// Shorthand tag read. Absent kinds read as 0.
    pub fn tag(&self, kind: TagKind) -> EngineResult<i64> {
        Ok(self.tags()?.value(kind))
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::new(100, 5)
    }
}
