//! Trigger queue integration tests.
//!
//! These tests pin the observable ordering contract: plans drain strictly
//! FIFO, plans queued mid-drain go to the back, nested drains defer to the
//! outer loop, and a self-perpetuating binding hits the plan budget.

use skirmish::{
    Action, Card, CounterRng, EngineError, GameState, Pile, Plan, Side, TagKind, Team, Trigger,
    Unit,
};

fn card(n: i64) -> Card {
    Card::new(Action::BumpSelfTag {
        kind: TagKind::Power,
        delta: n,
    })
}

fn unit_with(bindings: Vec<(Trigger, Action)>) -> Unit {
    let mut unit = Unit::new(10, 1);
    for (trigger, action) in bindings {
        unit.abilities_detach().unwrap().bind(trigger, action);
    }
    unit
}

/// Attacker abilities drain before defender abilities.
///
/// With counter seed 5, draw-then-shuffle leaves the two remaining cards in
/// the original order; shuffle-then-draw would leave them swapped. The deck
/// order after the drain therefore discriminates the two schedules.
#[test]
fn test_attacker_plans_drain_first() {
    let mut game = GameState::new(Box::new(CounterRng::new(5)));
    game.set_deck(Pile::from_cards([card(1), card(2), card(3)]));
    game.set_allies(Team::from_units([unit_with(vec![(
        Trigger::attack(),
        Action::Draw,
    )])]));
    game.set_enemies(Team::from_units([unit_with(vec![(
        Trigger::attacked(),
        Action::ShuffleDeck,
    )])]));

    game.attack(Side::Ally, 0, 0).unwrap();
    assert_eq!(game.pending_len(), 2);
    game.process_triggers().unwrap();

    assert_eq!(game.hand().unwrap().peek_top(), Some(&card(3)));
    let deck: Vec<_> = game.deck().unwrap().iter().cloned().collect();
    assert_eq!(deck, vec![card(1), card(2)]);
}

/// Multiple bindings on one trigger queue in table order.
#[test]
fn test_bindings_fire_in_table_order() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_deck(Pile::from_cards([card(1), card(2)]));
    game.set_allies(Team::from_units([unit_with(vec![
        (Trigger::attack(), Action::Draw),
        (Trigger::attack(), Action::Draw),
    ])]));
    game.set_enemies(Team::from_units([Unit::new(10, 1)]));

    game.attack(Side::Ally, 0, 0).unwrap();
    game.process_triggers().unwrap();

    assert_eq!(game.hand().unwrap().len(), 2);
    assert!(game.deck().unwrap().is_empty());
}

/// A plan queued by a running plan is processed in the same drain.
#[test]
fn test_mid_drain_enqueue_is_drained() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_deck(Pile::from_cards([card(1)]));
    game.set_allies(Team::from_units([unit_with(vec![(
        Trigger::attack(),
        Action::ApplyPoison,
    )])]));
    game.set_enemies(Team::from_units([unit_with(vec![(
        Trigger::tag_bumped(TagKind::Poison),
        Action::Draw,
    )])]));

    game.attack(Side::Ally, 0, 0).unwrap();
    game.process_triggers().unwrap();

    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Poison).unwrap(), 10);
    assert_eq!(game.hand().unwrap().len(), 1);
    assert_eq!(game.pending_len(), 0);
}

/// A strike executed inside a drain defers its own drain to the outer
/// loop: the attack abilities it queues still run, once, in FIFO order.
#[test]
fn test_nested_drain_defers_to_outer_loop() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_allies(Team::from_units([unit_with(vec![(
        Trigger::attack(),
        Action::ApplyPoison,
    )])]));

    let mut enemy = Unit::new(10, 1);
    enemy
        .tags_detach()
        .unwrap()
        .bump(TagKind::Power, 5)
        .unwrap();
    game.set_enemies(Team::from_units([enemy]));

    game.enqueue(Plan {
        action: Action::Strike { side: Side::Ally },
        side: Side::Ally,
        unit_idx: 0,
    });
    game.process_triggers().unwrap();

    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Damage).unwrap(), 5);
    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Poison).unwrap(), 10);
    assert_eq!(game.pending_len(), 0);
}

/// Only positive bumps fire `TagBumped` bindings.
#[test]
fn test_negative_bump_fires_nothing() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_deck(Pile::from_cards([card(1)]));
    game.set_enemies(Team::from_units([unit_with(vec![(
        Trigger::tag_bumped(TagKind::Poison),
        Action::Draw,
    )])]));

    game.bump_unit_tag(Side::Enemy, 0, TagKind::Poison, -5)
        .unwrap();
    game.process_triggers().unwrap();

    assert!(game.hand().unwrap().is_empty());
    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Poison).unwrap(), -5);
}

/// A binding that perpetually re-queues itself aborts the drain at the
/// plan budget instead of spinning forever.
#[test]
fn test_runaway_binding_hits_budget() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_plan_budget(16);
    game.set_enemies(Team::from_units([unit_with(vec![(
        Trigger::tag_bumped(TagKind::Poison),
        Action::ApplyPoison,
    )])]));

    game.enqueue(Plan {
        action: Action::ApplyPoison,
        side: Side::Ally,
        unit_idx: 0,
    });
    assert_eq!(
        game.process_triggers().unwrap_err(),
        EngineError::RunawayTriggers { limit: 16 }
    );
}

/// After an aborted drain the state accepts new work.
#[test]
fn test_drain_recovers_after_error() {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_allies(Team::from_units([Unit::new(10, 1)]));
    game.set_enemies(Team::from_units([Unit::new(10, 1)]));

    // Draw from an empty deck fails the drain.
    game.enqueue(Plan {
        action: Action::Draw,
        side: Side::Ally,
        unit_idx: 0,
    });
    assert!(game.process_triggers().is_err());

    // The queue is usable again.
    game.enqueue(Plan {
        action: Action::ApplyPoison,
        side: Side::Ally,
        unit_idx: 0,
    });
    game.process_triggers().unwrap();
    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Poison).unwrap(), 10);
}
