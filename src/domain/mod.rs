// ============================================================================
// Domain Models Module
// Value types shared by every stage of the computation
// ============================================================================

pub mod approximation;
pub mod budget;
pub mod config;
pub mod sequence;

pub use approximation::PiApproximation;
pub use budget::{DigitBudget, DIGITS_PER_TERM, GUARD_BITS};
pub use config::{ComputeConfig, DEFAULT_WORKER_COUNT};
pub use sequence::{FloatSequence, TermRole, TermSequence};
