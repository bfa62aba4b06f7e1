//! Engine error taxonomy.
//!
//! Every failure here is an authoring error in an action or ability binding,
//! not a transient fault. Callers are expected to surface the error verbatim
//! and reject or re-run the whole simulation step; there is no retry policy
//! and no partial continuation.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by state primitives, actions, and the trigger drain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A shared reference was read or detached while unset.
    #[error("null state: {0} is unset")]
    NullState(&'static str),

    /// An invariant or contract was breached (empty-collection access,
    /// contextual accessor used outside trigger processing, ...).
    #[error("precondition violated: {0}")]
    PreconditionViolated(&'static str),

    /// A caller-supplied value was outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The trigger queue failed to drain within the plan budget.
    /// An ability that perpetually re-queues itself is a fatal authoring
    /// error; the drain aborts rather than silently truncating.
    #[error("trigger queue failed to drain after {limit} plans")]
    RunawayTriggers { limit: usize },
}
