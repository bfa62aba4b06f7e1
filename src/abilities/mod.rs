//! Triggers and per-unit ability tables.
//!
//! A trigger is an enumerated event kind; an ability binds a trigger to an
//! action. When a primitive fires a trigger (an attack, a tag increase),
//! every bound action is queued as a plan for the trigger-resolution drain —
//! side effects flow through the queue, never through direct calls.
//!
//! Trigger keys are an explicit pair `{category, optional tag kind}` so that
//! "any time tag X increases" is one concrete key without relying on numeric
//! offset arithmetic between enumerated spaces. Matching is exact-value; no
//! wildcard or hierarchical dispatch.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::actions::Action;
use crate::core::TagKind;

/// The base event category of a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerCategory {
    /// The owning unit instigated an attack.
    Attack,
    /// The owning unit is the target of an attack.
    Attacked,
    /// One of the owning unit's tag counters was incremented.
    TagBumped,
}

/// A concrete trigger key: category plus, for tag events, the tag kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    pub category: TriggerCategory,
    pub tag: Option<TagKind>,
}

impl Trigger {
    /// Fires when the owning unit attacks.
    #[must_use]
    pub const fn attack() -> Self {
        Self {
            category: TriggerCategory::Attack,
            tag: None,
        }
    }

    /// Fires when the owning unit is attacked.
    #[must_use]
    pub const fn attacked() -> Self {
        Self {
            category: TriggerCategory::Attacked,
            tag: None,
        }
    }

    /// Fires when the owning unit's `kind` counter is incremented.
    #[must_use]
    pub const fn tag_bumped(kind: TagKind) -> Self {
        Self {
            category: TriggerCategory::TagBumped,
            tag: Some(kind),
        }
    }
}

/// A (trigger, action) binding attached to a unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub trigger: Trigger,
    pub action: Action,
}

impl Ability {
    #[must_use]
    pub fn new(trigger: Trigger, action: Action) -> Self {
        Self { trigger, action }
    }
}

/// Ordered list of a unit's abilities.
///
/// Insertion order is irrelevant for which abilities fire, but it is the
/// order they are queued in, so it is deterministic and observable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityTable {
    abilities: SmallVec<[Ability; 4]>,
}

impl AbilityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an action to a trigger.
    pub fn bind(&mut self, trigger: Trigger, action: Action) {
        self.abilities.push(Ability::new(trigger, action));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Every action bound to exactly `trigger`, in table order.
    #[must_use]
    pub fn triggered(&self, trigger: Trigger) -> Vec<Action> {
        self.abilities
            .iter()
            .filter(|a| a.trigger == trigger)
            .map(|a| a.action.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }
}
