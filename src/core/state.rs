//! Game state: the only mutation surface actions may use.
//!
//! Every sub-structure (RNG, the three card piles, both teams) is a shared
//! reference. Reads borrow; mutations go through a `_detach` accessor that
//! copies the container iff the reference is shared, so clones of a
//! `GameState` diverge at exactly the narrowest point a mutation occurred.
//! Whether a detach actually copied is not observable to callers.
//!
//! Side effects flow through the pending-plan queue: `attack` and tag bumps
//! enqueue trigger-bound actions, and [`GameState::process_triggers`] drains
//! the queue FIFO to fixed point.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::trace;

use crate::abilities::Trigger;
use crate::actions::Action;
use crate::content::ClassRegistry;

use super::error::{EngineError, EngineResult};
use super::rng::RngSource;
use super::tag::TagKind;
use super::team::{Side, Team};
use super::zone::Pile;

/// Default limit on plans processed per drain before the queue is declared
/// runaway.
pub const DEFAULT_PLAN_BUDGET: usize = 10_000;

/// A queued unit of trigger work: which action to run, and which unit owns
/// it while it runs.
#[derive(Clone, Debug)]
pub struct Plan {
    pub action: Action,
    pub side: Side,
    pub unit_idx: usize,
}

/// Context installed while a plan is being processed.
#[derive(Clone, Copy, Debug)]
struct ActorCtx {
    side: Side,
    unit_idx: usize,
    /// Signed cursor into the opposing team; wraps via `rem_euclid` at read
    /// time so scripted "next target" moves can go either direction.
    target_cursor: i64,
}

/// Aggregate simulation state.
#[derive(Clone, Debug)]
pub struct GameState {
    rng: Option<Arc<dyn RngSource>>,
    deck: Option<Arc<Pile>>,
    hand: Option<Arc<Pile>>,
    discard: Option<Arc<Pile>>,
    allies: Option<Arc<Team>>,
    enemies: Option<Arc<Team>>,
    classes: Arc<ClassRegistry>,
    pending: VecDeque<Plan>,
    actor: Option<ActorCtx>,
    draining: bool,
    plan_budget: usize,
}

impl GameState {
    /// A state with every sub-structure initialized empty.
    #[must_use]
    pub fn new(rng: Box<dyn RngSource>) -> Self {
        Self {
            rng: Some(Arc::from(rng)),
            deck: Some(Arc::new(Pile::new())),
            hand: Some(Arc::new(Pile::new())),
            discard: Some(Arc::new(Pile::new())),
            allies: Some(Arc::new(Team::new())),
            enemies: Some(Arc::new(Team::new())),
            classes: Arc::new(ClassRegistry::new()),
            pending: VecDeque::new(),
            actor: None,
            draining: false,
            plan_budget: DEFAULT_PLAN_BUDGET,
        }
    }

    /// A state with every reference unset. Reads and detaches fail with
    /// `NullState` until the fields are assigned.
    #[must_use]
    pub fn unset() -> Self {
        Self {
            rng: None,
            deck: None,
            hand: None,
            discard: None,
            allies: None,
            enemies: None,
            classes: Arc::new(ClassRegistry::new()),
            pending: VecDeque::new(),
            actor: None,
            draining: false,
            plan_budget: DEFAULT_PLAN_BUDGET,
        }
    }

    // === Assignment ===

    pub fn set_rng(&mut self, rng: Box<dyn RngSource>) {
        self.rng = Some(Arc::from(rng));
    }

    pub fn set_deck(&mut self, deck: Pile) {
        self.deck = Some(Arc::new(deck));
    }

    pub fn set_hand(&mut self, hand: Pile) {
        self.hand = Some(Arc::new(hand));
    }

    pub fn set_discard(&mut self, discard: Pile) {
        self.discard = Some(Arc::new(discard));
    }

    pub fn set_allies(&mut self, team: Team) {
        self.allies = Some(Arc::new(team));
    }

    pub fn set_enemies(&mut self, team: Team) {
        self.enemies = Some(Arc::new(team));
    }

    pub fn set_classes(&mut self, classes: ClassRegistry) {
        self.classes = Arc::new(classes);
    }

    /// Cap on plans processed per drain. See [`DEFAULT_PLAN_BUDGET`].
    pub fn set_plan_budget(&mut self, budget: usize) {
        self.plan_budget = budget;
    }

    // === Reads (borrow, never copy) ===

    pub fn deck(&self) -> EngineResult<&Pile> {
        self.deck.as_deref().ok_or(EngineError::NullState("deck"))
    }

    pub fn hand(&self) -> EngineResult<&Pile> {
        self.hand.as_deref().ok_or(EngineError::NullState("hand"))
    }

    pub fn discard(&self) -> EngineResult<&Pile> {
        self.discard
            .as_deref()
            .ok_or(EngineError::NullState("discard"))
    }

    pub fn allies(&self) -> EngineResult<&Team> {
        self.allies
            .as_deref()
            .ok_or(EngineError::NullState("allies"))
    }

    pub fn enemies(&self) -> EngineResult<&Team> {
        self.enemies
            .as_deref()
            .ok_or(EngineError::NullState("enemies"))
    }

    pub fn team(&self, side: Side) -> EngineResult<&Team> {
        match side {
            Side::Ally => self.allies(),
            Side::Enemy => self.enemies(),
        }
    }

    #[must_use]
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    // === Detaches (copy iff shared) ===

    pub fn deck_detach(&mut self) -> EngineResult<&mut Pile> {
        let arc = self.deck.as_mut().ok_or(EngineError::NullState("deck"))?;
        Ok(Arc::make_mut(arc))
    }

    pub fn hand_detach(&mut self) -> EngineResult<&mut Pile> {
        let arc = self.hand.as_mut().ok_or(EngineError::NullState("hand"))?;
        Ok(Arc::make_mut(arc))
    }

    pub fn discard_detach(&mut self) -> EngineResult<&mut Pile> {
        let arc = self
            .discard
            .as_mut()
            .ok_or(EngineError::NullState("discard"))?;
        Ok(Arc::make_mut(arc))
    }

    pub fn allies_detach(&mut self) -> EngineResult<&mut Team> {
        let arc = self
            .allies
            .as_mut()
            .ok_or(EngineError::NullState("allies"))?;
        Ok(Arc::make_mut(arc))
    }

    pub fn enemies_detach(&mut self) -> EngineResult<&mut Team> {
        let arc = self
            .enemies
            .as_mut()
            .ok_or(EngineError::NullState("enemies"))?;
        Ok(Arc::make_mut(arc))
    }

    pub fn team_detach(&mut self, side: Side) -> EngineResult<&mut Team> {
        match side {
            Side::Ally => self.allies_detach(),
            Side::Enemy => self.enemies_detach(),
        }
    }

    // === RNG ===

    /// Next random value in `min..=max`, versioning the RNG snapshot.
    ///
    /// Fails with `InvalidArgument` when `min > max`. When `min == max` the
    /// value is returned without consuming RNG state; the sources themselves
    /// always advance when queried, so the short-circuit lives here and only
    /// here.
    pub fn next_random(&mut self, min: i64, max: i64) -> EngineResult<i64> {
        let rng = self.rng.as_ref().ok_or(EngineError::NullState("rng"))?;
        if min > max {
            return Err(EngineError::InvalidArgument(format!(
                "inverted range: min {min} > max {max}"
            )));
        }
        if min == max {
            return Ok(min);
        }
        let mut advanced = rng.clone_box();
        let value = advanced.next(min, max)?;
        self.rng = Some(Arc::from(advanced));
        Ok(value)
    }

    // === Tag primitives ===

    /// Read a unit's tag. No detach; indices wrap modulo team size.
    pub fn unit_tag(&self, side: Side, idx: usize, kind: TagKind) -> EngineResult<i64> {
        self.team(side)?.unit(idx)?.tag(kind)
    }

    /// Bump a unit's tag through the team → unit → tag-store detach chain
    /// and return the new value.
    ///
    /// A positive delta fires the unit's `TagBumped` abilities: each bound
    /// action is queued behind any already-pending plans.
    pub fn bump_unit_tag(
        &mut self,
        side: Side,
        idx: usize,
        kind: TagKind,
        delta: i64,
    ) -> EngineResult<i64> {
        let len = self.team(side)?.len();
        if len == 0 {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        let idx = idx % len;

        let value = self
            .team_detach(side)?
            .unit_detach(idx)?
            .tags_detach()?
            .bump(kind, delta)?;
        trace!(?side, idx, ?kind, delta, value, "tag bumped");

        if delta > 0 {
            let actions = self
                .team(side)?
                .unit(idx)?
                .abilities()?
                .triggered(Trigger::tag_bumped(kind));
            for action in actions {
                self.pending.push_back(Plan {
                    action,
                    side,
                    unit_idx: idx,
                });
            }
        }

        Ok(value)
    }

    // === Attack / trigger queue ===

    /// Enqueue the attacker's `Attack` abilities, then the defender's
    /// `Attacked` abilities. Applies no damage itself: damage is a separate
    /// action an ability chooses to run.
    pub fn attack(
        &mut self,
        from_side: Side,
        attacker_idx: usize,
        defender_idx: usize,
    ) -> EngineResult<()> {
        let to_side = from_side.opposite();
        let attackers = self.team(from_side)?.len();
        let defenders = self.team(to_side)?.len();
        if attackers == 0 || defenders == 0 {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        let attacker_idx = attacker_idx % attackers;
        let defender_idx = defender_idx % defenders;

        let mut plans = Vec::new();
        for action in self
            .team(from_side)?
            .unit(attacker_idx)?
            .abilities()?
            .triggered(Trigger::attack())
        {
            plans.push(Plan {
                action,
                side: from_side,
                unit_idx: attacker_idx,
            });
        }
        for action in self
            .team(to_side)?
            .unit(defender_idx)?
            .abilities()?
            .triggered(Trigger::attacked())
        {
            plans.push(Plan {
                action,
                side: to_side,
                unit_idx: defender_idx,
            });
        }

        trace!(
            ?from_side,
            attacker_idx,
            defender_idx,
            queued = plans.len(),
            "attack enqueued"
        );
        self.pending.extend(plans);
        Ok(())
    }

    /// Queue a plan directly (drivers use this to run a chosen card or a
    /// scripted behavior through the same FIFO as everything else).
    pub fn enqueue(&mut self, plan: Plan) {
        self.pending.push_back(plan);
    }

    /// Number of plans awaiting the next drain.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drain the pending queue strictly FIFO until empty.
    ///
    /// Each plan runs to completion with its owning unit installed as the
    /// actor context before the next is dequeued; plans pushed during the
    /// drain go to the back of the same queue, making this a work-list
    /// fixed point. A re-entrant call during a drain returns immediately:
    /// the outer loop owns the one global FIFO order.
    ///
    /// Aborts with `RunawayTriggers` once the plan budget is exhausted.
    pub fn process_triggers(&mut self) -> EngineResult<()> {
        if self.draining {
            return Ok(());
        }
        self.draining = true;

        let mut processed = 0usize;
        while let Some(plan) = self.pending.pop_front() {
            processed += 1;
            if processed > self.plan_budget {
                self.draining = false;
                self.actor = None;
                return Err(EngineError::RunawayTriggers {
                    limit: self.plan_budget,
                });
            }

            trace!(?plan.side, plan.unit_idx, "processing plan");
            self.actor = Some(ActorCtx {
                side: plan.side,
                unit_idx: plan.unit_idx,
                target_cursor: 0,
            });
            let result = plan.action.run(self);
            self.actor = None;

            if let Err(err) = result {
                self.draining = false;
                return Err(err);
            }
        }

        self.draining = false;
        Ok(())
    }

    // === Actor context (valid only while a plan is processed) ===

    fn actor(&self) -> EngineResult<&ActorCtx> {
        self.actor
            .as_ref()
            .ok_or(EngineError::PreconditionViolated(
                "no plan is being processed",
            ))
    }

    /// Side of the unit owning the currently executing plan.
    pub fn side(&self) -> EngineResult<Side> {
        Ok(self.actor()?.side)
    }

    /// Team index of the unit owning the currently executing plan.
    pub fn idx(&self) -> EngineResult<usize> {
        Ok(self.actor()?.unit_idx)
    }

    /// Whether the acting unit is its team's leader.
    pub fn is_lead(&self) -> EngineResult<bool> {
        let ctx = *self.actor()?;
        let len = self.team(ctx.side)?.len();
        if len == 0 {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        Ok(ctx.unit_idx % len == Team::LEADER)
    }

    /// Whether the acting unit is alive, i.e. its `Dead` tag is 0.
    pub fn is_alive(&self) -> EngineResult<bool> {
        let ctx = *self.actor()?;
        Ok(self.unit_tag(ctx.side, ctx.unit_idx, TagKind::Dead)? == 0)
    }

    /// Move the acting plan's target cursor by `dist` (either direction).
    pub fn advance_target(&mut self, dist: i64) -> EngineResult<()> {
        let ctx = self
            .actor
            .as_mut()
            .ok_or(EngineError::PreconditionViolated(
                "no plan is being processed",
            ))?;
        ctx.target_cursor += dist;
        Ok(())
    }

    /// Resolve the acting plan's current target: the opposing team and the
    /// wrapped cursor position within it.
    pub fn target_slot(&self) -> EngineResult<(Side, usize)> {
        let ctx = *self.actor()?;
        let side = ctx.side.opposite();
        let len = self.team(side)?.len() as i64;
        if len == 0 {
            return Err(EngineError::PreconditionViolated("team has no units"));
        }
        Ok((side, ctx.target_cursor.rem_euclid(len) as usize))
    }
}
