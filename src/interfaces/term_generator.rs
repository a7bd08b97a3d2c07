// ============================================================================
// Term Generator Interface
// Defines the contract for the per-role integer recurrence engines
// ============================================================================

use crate::concurrency::AbortSignal;
use crate::domain::{TermRole, TermSequence};
use crate::error::PiResult;

/// Strategy interface for term generators.
/// Implementations: one per [`TermRole`] (A–E).
///
/// A generator fills its sequence from its own recurrence only: it shares
/// no mutable state and never reads another generator's output, so all
/// five can run at once.
pub trait TermGenerator: Send + Sync {
    /// The role of the sequence this generator produces
    fn role(&self) -> TermRole;

    /// Produce `iterations` exact terms, indexed from 0.
    ///
    /// Implementations poll `signal` between steps and stop with
    /// `PiError::Aborted` once it is raised.
    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence>;
}
