//! The action catalogue.
//!
//! Actions are plain data resolved against a [`GameState`]; cards, scripted
//! unit behaviors, and ability bindings are all built from this one enum.
//! Composite behaviors use [`Action::Seq`].
//!
//! Target-relative actions (`BumpTargetTag`, `NextTarget`, ...) are only
//! meaningful while a plan is being processed: the acting plan supplies the
//! self side/index and the target cursor into the opposing team.

use serde::{Deserialize, Serialize};

use crate::content::UnitClassId;
use crate::core::{
    EngineError, EngineResult, GameState, Plan, Rotate, Side, TagKind, Team,
};

/// A polymorphic unit of behavior run against the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move the top card of the deck to the hand. Fails if the deck is
    /// empty.
    Draw,

    /// Permute the deck by drawing without replacement with `next_random`.
    /// No-op on an empty deck.
    ShuffleDeck,

    /// Pop the deck top, run its action, then append the card to the
    /// discard pile. Fails if the deck is empty.
    PlayTopCard,

    /// Leader-vs-leader strike from `side`. A dead or stunned acting leader
    /// makes this a no-op, not a failure.
    Strike { side: Side },

    /// `Strike{side}` followed by the counter-strike.
    Clash { side: Side },

    /// 10 poison stacks on the enemy leader.
    ApplyPoison,

    /// Bump a tag on the acting unit.
    BumpSelfTag { kind: TagKind, delta: i64 },

    /// Bump a tag on the current target.
    BumpTargetTag { kind: TagKind, delta: i64 },

    /// Adjust the current target's hp. Does not touch the `Dead` tag.
    BumpTargetHp { delta: i64 },

    /// Move the target cursor; negative distances move backwards. Wraps.
    NextTarget { dist: i64 },

    /// Rotate the acting unit's team order.
    RotateSelf { dir: Rotate, dist: usize },

    /// Rotate the target team order.
    RotateTarget { dir: Rotate, dist: usize },

    /// Spawn a unit of `class` at the back of the target team, queueing its
    /// spawn hook.
    SpawnTarget { class: UnitClassId },

    /// Run each action in order, stopping at the first failure.
    Seq(Vec<Action>),
}

impl Action {
    /// Resolve this action against `game`.
    pub fn run(&self, game: &mut GameState) -> EngineResult<()> {
        match self {
            Action::Draw => {
                if game.deck()?.is_empty() {
                    return Err(EngineError::PreconditionViolated("deck is empty"));
                }
                let card = game
                    .deck_detach()?
                    .pop_top()
                    .ok_or(EngineError::PreconditionViolated("deck is empty"))?;
                game.hand_detach()?.push_top(card);
                Ok(())
            }

            Action::ShuffleDeck => {
                let mut remaining: Vec<_> = game.deck()?.iter().cloned().collect();
                let mut shuffled = Vec::with_capacity(remaining.len());
                while !remaining.is_empty() {
                    let len = remaining.len();
                    let idx = game.next_random(0, len as i64)? as usize % len;
                    shuffled.push(remaining.remove(idx));
                }
                game.deck_detach()?.set_cards(shuffled);
                Ok(())
            }

            Action::PlayTopCard => {
                if game.deck()?.is_empty() {
                    return Err(EngineError::PreconditionViolated("deck is empty"));
                }
                let card = game
                    .deck_detach()?
                    .pop_top()
                    .ok_or(EngineError::PreconditionViolated("deck is empty"))?;
                card.action().run(game)?;
                game.discard_detach()?.push_top(card);
                Ok(())
            }

            Action::Strike { side } => {
                let side = *side;
                let foe = side.opposite();

                let dead = game.unit_tag(side, Team::LEADER, TagKind::Dead)? > 0;
                let stunned = game.unit_tag(side, Team::LEADER, TagKind::Stun)? > 0;
                if dead || stunned {
                    return Ok(());
                }

                // Power is attributed to the opposing leader's buffed Power
                // tag, not to any unit's static power field.
                let power = game.unit_tag(foe, Team::LEADER, TagKind::Power)?;

                game.attack(side, Team::LEADER, Team::LEADER)?;
                if power != 0 {
                    game.bump_unit_tag(foe, Team::LEADER, TagKind::Damage, power)?;
                }
                game.process_triggers()
            }

            Action::Clash { side } => {
                Action::Strike { side: *side }.run(game)?;
                Action::Strike {
                    side: side.opposite(),
                }
                .run(game)
            }

            Action::ApplyPoison => {
                game.bump_unit_tag(Side::Enemy, Team::LEADER, TagKind::Poison, 10)?;
                Ok(())
            }

            Action::BumpSelfTag { kind, delta } => {
                let side = game.side()?;
                let idx = game.idx()?;
                game.bump_unit_tag(side, idx, *kind, *delta)?;
                Ok(())
            }

            Action::BumpTargetTag { kind, delta } => {
                let (side, idx) = game.target_slot()?;
                game.bump_unit_tag(side, idx, *kind, *delta)?;
                Ok(())
            }

            Action::BumpTargetHp { delta } => {
                let (side, idx) = game.target_slot()?;
                game.team_detach(side)?.unit_detach(idx)?.hp += delta;
                Ok(())
            }

            Action::NextTarget { dist } => game.advance_target(*dist),

            Action::RotateSelf { dir, dist } => {
                let side = game.side()?;
                game.team_detach(side)?.rotate(*dir, *dist);
                Ok(())
            }

            Action::RotateTarget { dir, dist } => {
                let side = game.side()?.opposite();
                game.team_detach(side)?.rotate(*dir, *dist);
                Ok(())
            }

            Action::SpawnTarget { class } => {
                let class = game
                    .classes()
                    .get(*class)
                    .ok_or_else(|| {
                        EngineError::InvalidArgument(format!("unknown unit class {class:?}"))
                    })?
                    .clone();
                let side = game.side()?.opposite();

                let team = game.team_detach(side)?;
                team.push(class.instantiate());
                let idx = team.len() - 1;

                if let Some(hook) = class.on_spawn.clone() {
                    game.enqueue(Plan {
                        action: hook,
                        side,
                        unit_idx: idx,
                    });
                }
                Ok(())
            }

            Action::Seq(actions) => {
                for action in actions {
                    action.run(game)?;
                }
                Ok(())
            }
        }
    }
}
