//! Driver scenario tests with the stock content set.

use skirmish::{
    content, driver, CounterRng, GameState, Pile, Side, TagKind, Team, Unit,
};

/// Party of one dwarf facing the gnoll den.
fn den_state() -> (GameState, content::StockClasses) {
    let mut game = GameState::new(Box::new(CounterRng::new(0)));
    game.set_allies(Team::from_units([Unit::new(10, 5)]));

    let mut registry = content::ClassRegistry::new();
    let stock = content::register_stock_classes(&mut registry);
    game.set_classes(registry);

    (game, stock)
}

#[test]
fn test_gnoll_den_entry_spawns_buffed_gnolls() {
    let (mut game, stock) = den_state();
    driver::enter_room(&mut game, &content::gnoll_den(stock.gnoll)).unwrap();

    let enemies = game.enemies().unwrap();
    assert_eq!(enemies.len(), 3);
    for idx in 0..3 {
        assert_eq!(enemies.unit(idx).unwrap().hp, 3);
        assert_eq!(
            game.unit_tag(Side::Enemy, idx, TagKind::Power).unwrap(),
            3
        );
    }
}

/// The axe cleaves across three adjacent targets with falling damage.
#[test]
fn test_axe_cleaves_the_gnoll_line() {
    let (mut game, stock) = den_state();
    driver::enter_room(&mut game, &content::gnoll_den(stock.gnoll)).unwrap();
    game.set_hand(Pile::from_cards([content::axe()]));

    assert!(driver::run_bottom(&mut game, 0, 0).unwrap());

    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Damage).unwrap(), 3);
    assert_eq!(game.unit_tag(Side::Enemy, 1, TagKind::Damage).unwrap(), 2);
    assert_eq!(game.unit_tag(Side::Enemy, 2, TagKind::Damage).unwrap(), 1);
    assert_eq!(game.discard().unwrap().len(), 1);
}

/// The gnoll turn script: buff self, claw the ally leader, cycle the line.
#[test]
fn test_gnoll_turn_script() {
    let (mut game, stock) = den_state();
    driver::enter_room(&mut game, &content::gnoll_den(stock.gnoll)).unwrap();

    assert!(driver::run_top(&mut game).unwrap());

    // The acting gnoll buffed to 4 and rotated to slot 1; a fresh gnoll
    // leads now.
    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Power).unwrap(), 3);
    assert_eq!(game.unit_tag(Side::Enemy, 1, TagKind::Power).unwrap(), 4);
    assert_eq!(game.unit_tag(Side::Ally, 0, TagKind::Damage).unwrap(), 1);
}

/// The morningstar hits the leader and scatters the line, so the next hit
/// lands on a different gnoll.
#[test]
fn test_morningstar_scatters_targets() {
    let (mut game, stock) = den_state();
    driver::enter_room(&mut game, &content::gnoll_den(stock.gnoll)).unwrap();
    game.set_hand(Pile::from_cards([
        content::morningstar(),
        content::morningstar(),
    ]));

    driver::run_bottom(&mut game, 0, 1).unwrap();
    driver::run_bottom(&mut game, 0, 0).unwrap();

    // First hit landed on the original leader, which the rotate pushed to
    // slot 1; the second hit landed on the gnoll rotated into the lead,
    // which the second rotate pushed to slot 1 while the first victim
    // moved to slot 2.
    assert_eq!(game.unit_tag(Side::Enemy, 1, TagKind::Damage).unwrap(), 4);
    assert_eq!(game.unit_tag(Side::Enemy, 2, TagKind::Damage).unwrap(), 4);
    assert_eq!(game.unit_tag(Side::Enemy, 0, TagKind::Damage).unwrap(), 0);
}

struct FirstCard;

impl driver::Decider for FirstCard {
    fn choose(&mut self, _game: &GameState) -> skirmish::EngineResult<(usize, usize)> {
        Ok((0, 0))
    }
}

/// A short full encounter: three turns of trading blows with the den.
#[test]
fn test_full_encounter_loop() {
    let (mut game, stock) = den_state();
    game.set_deck(Pile::from_cards([
        content::sword(),
        content::sword(),
        content::axe(),
    ]));

    driver::run(
        &mut game,
        &mut FirstCard,
        &content::gnoll_den(stock.gnoll),
        3,
    )
    .unwrap();

    // All three cards were drawn and played.
    assert!(game.deck().unwrap().is_empty());
    assert!(game.hand().unwrap().is_empty());
    assert_eq!(game.discard().unwrap().len(), 3);

    // Three gnoll turns: one claw each on the ally leader.
    assert_eq!(game.unit_tag(Side::Ally, 0, TagKind::Damage).unwrap(), 3);
}
