//! Content surface: unit classes, rooms, and item cards.
//!
//! Content is pure data plus action bindings, never engine logic: a class
//! is base stats, an optional scripted behavior, an optional spawn hook,
//! and ability bindings; a room is an entry action. The stock definitions
//! at the bottom are the reference encounter set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::abilities::Ability;
use crate::actions::Action;
use crate::core::{Card, Rotate, TagKind, Unit};

/// Unique identifier for a unit class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitClassId(pub u32);

impl UnitClassId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnitClass({})", self.0)
    }
}

/// A unit class: name, base stats, and scripted behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitClass {
    pub id: UnitClassId,
    pub name: String,
    pub hp: i64,
    pub power: i64,
    /// Action the driver runs when this unit acts on its turn.
    pub behavior: Option<Action>,
    /// Action queued for the unit right after it spawns.
    pub on_spawn: Option<Action>,
    /// Ability bindings every instance starts with.
    pub abilities: SmallVec<[Ability; 4]>,
}

impl UnitClass {
    pub fn new(name: impl Into<String>, hp: i64, power: i64) -> Self {
        Self {
            id: UnitClassId::new(0),
            name: name.into(),
            hp,
            power,
            behavior: None,
            on_spawn: None,
            abilities: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_behavior(mut self, action: Action) -> Self {
        self.behavior = Some(action);
        self
    }

    #[must_use]
    pub fn with_on_spawn(mut self, action: Action) -> Self {
        self.on_spawn = Some(action);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Build a fresh unit of this class.
    #[must_use]
    pub fn instantiate(&self) -> Unit {
        let mut unit = Unit::new(self.hp, self.power);
        unit.class = Some(self.id);
        if !self.abilities.is_empty() {
            let table = self.abilities.iter().fold(
                crate::abilities::AbilityTable::new(),
                |mut table, ability| {
                    table.bind(ability.trigger, ability.action.clone());
                    table
                },
            );
            unit.set_abilities(table);
        }
        unit
    }
}

/// Id-keyed store of unit classes.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<UnitClassId, UnitClass>,
    next_id: u32,
}

impl ClassRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, allocating its id. Returns the id.
    pub fn register(&mut self, mut class: UnitClass) -> UnitClassId {
        let id = UnitClassId::new(self.next_id);
        self.next_id += 1;
        class.id = id;
        self.classes.insert(id, class);
        id
    }

    #[must_use]
    pub fn get(&self, id: UnitClassId) -> Option<&UnitClass> {
        self.classes.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Room category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    Empty,
    Encounter,
    Shop,
}

/// An encounter definition: what happens when the party enters.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub name: String,
    pub kind: RoomKind,
    pub on_enter: Action,
}

impl Room {
    pub fn new(name: impl Into<String>, kind: RoomKind, on_enter: Action) -> Self {
        Self {
            name: name.into(),
            kind,
            on_enter,
        }
    }
}

/// Handles to the stock classes after registration.
#[derive(Clone, Copy, Debug)]
pub struct StockClasses {
    pub dwarf: UnitClassId,
    pub gnoll: UnitClassId,
    pub shop_keeper: UnitClassId,
}

/// Register the stock unit classes and return their ids.
pub fn register_stock_classes(registry: &mut ClassRegistry) -> StockClasses {
    let dwarf = registry.register(
        UnitClass::new("dwarf", 10, 5).with_on_spawn(Action::BumpSelfTag {
            kind: TagKind::Power,
            delta: 10,
        }),
    );

    let gnoll = registry.register(
        UnitClass::new("gnoll", 3, 1)
            .with_on_spawn(Action::BumpSelfTag {
                kind: TagKind::Power,
                delta: 3,
            })
            .with_behavior(Action::Seq(vec![
                Action::BumpSelfTag {
                    kind: TagKind::Power,
                    delta: 1,
                },
                Action::BumpTargetTag {
                    kind: TagKind::Damage,
                    delta: 1,
                },
                Action::RotateSelf {
                    dir: Rotate::Right,
                    dist: 1,
                },
            ])),
    );

    let shop_keeper = registry.register(
        UnitClass::new("shop_keeper", 100, 0).with_on_spawn(Action::BumpSelfTag {
            kind: TagKind::Power,
            delta: 100,
        }),
    );

    StockClasses {
        dwarf,
        gnoll,
        shop_keeper,
    }
}

/// Three gnolls spawn on entry.
#[must_use]
pub fn gnoll_den(gnoll: UnitClassId) -> Room {
    Room::new(
        "gnoll_den",
        RoomKind::Encounter,
        Action::Seq(vec![
            Action::SpawnTarget { class: gnoll },
            Action::SpawnTarget { class: gnoll },
            Action::SpawnTarget { class: gnoll },
        ]),
    )
}

/// A lone shop keeper spawns on entry.
#[must_use]
pub fn shop(shop_keeper: UnitClassId) -> Room {
    Room::new(
        "shop",
        RoomKind::Shop,
        Action::SpawnTarget { class: shop_keeper },
    )
}

/// Single heavy hit.
#[must_use]
pub fn sword() -> Card {
    Card::new(Action::BumpTargetTag {
        kind: TagKind::Damage,
        delta: 5,
    })
}

/// Cleave: damage falls off across three adjacent targets.
#[must_use]
pub fn axe() -> Card {
    Card::new(Action::Seq(vec![
        Action::BumpTargetTag {
            kind: TagKind::Damage,
            delta: 3,
        },
        Action::NextTarget { dist: 1 },
        Action::BumpTargetTag {
            kind: TagKind::Damage,
            delta: 2,
        },
        Action::NextTarget { dist: 1 },
        Action::BumpTargetTag {
            kind: TagKind::Damage,
            delta: 1,
        },
    ]))
}

/// Hit and scatter the enemy line.
#[must_use]
pub fn morningstar() -> Card {
    Card::new(Action::Seq(vec![
        Action::BumpTargetTag {
            kind: TagKind::Damage,
            delta: 4,
        },
        Action::RotateTarget {
            dir: Rotate::Right,
            dist: 1,
        },
    ]))
}
