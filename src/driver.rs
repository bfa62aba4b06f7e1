//! Driver entry points.
//!
//! The driver owns turn order, not game rules: it feeds chosen cards and
//! scripted behaviors into the same plan queue every other side effect uses,
//! then drains it. Player input itself (console or otherwise) lives outside
//! this crate; a [`Decider`] supplies the two indices a turn needs.

use tracing::debug;

use crate::core::{EngineError, EngineResult, GameState, Plan, Side, Team};

/// Supplies the per-turn choice: which ally acts, and which hand card to
/// play.
pub trait Decider {
    fn choose(&mut self, game: &GameState) -> EngineResult<(usize, usize)>;
}

/// Fill the hand up to `hand_size` cards from the deck, stopping early when
/// the deck runs out.
pub fn refill_hand(game: &mut GameState, hand_size: usize) -> EngineResult<()> {
    while game.hand()?.len() < hand_size && !game.deck()?.is_empty() {
        let card = game
            .deck_detach()?
            .pop_top()
            .ok_or(EngineError::PreconditionViolated("deck is empty"))?;
        game.hand_detach()?.push_top(card);
    }
    Ok(())
}

/// Run the chosen hand card as a plan owned by ally unit `unit_idx`, then
/// drain. The played card moves to the discard pile before its action runs,
/// so a failed drain never loses it.
///
/// Returns whether the ally side still has actors.
pub fn run_bottom(game: &mut GameState, unit_idx: usize, card_idx: usize) -> EngineResult<bool> {
    if game.allies()?.is_empty() {
        return Ok(false);
    }
    let unit_idx = unit_idx % game.allies()?.len();

    let card = game
        .hand_detach()?
        .remove(card_idx)
        .ok_or(EngineError::PreconditionViolated("no card in hand slot"))?;

    debug!(unit_idx, card_idx, "ally acts");
    let action = card.action().clone();
    game.discard_detach()?.push_top(card);

    game.enqueue(Plan {
        action,
        side: Side::Ally,
        unit_idx,
    });
    game.process_triggers()?;
    Ok(true)
}

/// Run the enemy leader's scripted class behavior as a plan, then drain.
///
/// Returns whether the enemy side still has actors. A leader with no class
/// or no scripted behavior simply passes.
pub fn run_top(game: &mut GameState) -> EngineResult<bool> {
    if game.enemies()?.is_empty() {
        return Ok(false);
    }

    let class_id = game.enemies()?.unit(Team::LEADER)?.class;
    let behavior = class_id
        .and_then(|id| game.classes().get(id))
        .and_then(|class| class.behavior.clone());

    if let Some(action) = behavior {
        debug!("enemy leader acts");
        game.enqueue(Plan {
            action,
            side: Side::Enemy,
            unit_idx: Team::LEADER,
        });
        game.process_triggers()?;
    }
    Ok(true)
}

/// Run a room's entry action as an ally-owned plan and drain the spawn
/// hooks it queues.
pub fn enter_room(game: &mut GameState, room: &crate::content::Room) -> EngineResult<()> {
    debug!(room = %room.name, "entering room");
    game.enqueue(Plan {
        action: room.on_enter.clone(),
        side: Side::Ally,
        unit_idx: Team::LEADER,
    });
    game.process_triggers()
}

/// Full encounter loop: enter the room, then alternate ally and enemy
/// turns until a side is out of actors or `max_turns` elapse.
pub fn run(
    game: &mut GameState,
    decider: &mut dyn Decider,
    room: &crate::content::Room,
    max_turns: usize,
) -> EngineResult<()> {
    enter_room(game, room)?;

    const HAND_SIZE: usize = 3;
    for turn in 1..=max_turns {
        debug!(turn, "turn start");
        refill_hand(game, HAND_SIZE)?;

        let (unit_idx, card_idx) = decider.choose(game)?;
        if !run_bottom(game, unit_idx, card_idx)? {
            debug!(turn, "allies are out of actors");
            break;
        }
        if !run_top(game)? {
            debug!(turn, "enemies are out of actors");
            break;
        }
    }
    Ok(())
}
