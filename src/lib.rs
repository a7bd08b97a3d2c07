// ============================================================================
// Chudnovsky Pi Library
// Parallel arbitrary-precision computation of pi
// ============================================================================

//! # Chudnovsky Pi
//!
//! Computes π to an arbitrary number of decimal digits with the Chudnovsky
//! series.
//!
//! ## Pipeline
//!
//! 1. **Budget**: the digit count fixes the number of series terms and one
//!    working precision shared by every float in the run.
//! 2. **Generation**: five integer recurrences (A–E) run concurrently, one
//!    per term component, each producing exact `BigInt` sequences.
//! 3. **Combination**: each sequence is converted to [`numeric::BigFloat`]
//!    at the working precision.
//! 4. **Reduction**: the index range is partitioned across workers, each
//!    folding `(A/C)·(B/D)/E` over its own indices; partial sums are added
//!    in partition order.
//! 5. **Assembly**: `π = 426880·√10005 / sum`.
//!
//! Every phase ends at a join barrier. No locks are taken: each element is
//! owned by exactly one task at a time.
//!
//! ## Example
//!
//! ```rust
//! use chudnovsky_pi::prelude::*;
//!
//! let engine = PiEngine::new(ComputeConfig::new(50).with_worker_count(4));
//! let pi = engine.compute()?;
//!
//! assert_eq!(
//!     pi.to_digit_string(),
//!     "3.1415926535897932384626433832795028841971693993751"
//! );
//! println!("{} bits of precision", pi.precision_bits());
//! # Ok::<(), chudnovsky_pi::PiError>(())
//! ```

pub mod concurrency;
pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;
pub mod numeric;
pub mod utils;

pub use error::{PiError, PiResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ComputeConfig, DigitBudget, FloatSequence, PiApproximation, TermRole, TermSequence,
    };
    pub use crate::engine::{compute_pi, direct_series_pi, PiEngine};
    pub use crate::error::{PiError, PiResult};
    pub use crate::interfaces::{
        LoggingObserver, NoOpObserver, PipelineEvent, PipelineObserver, TermGenerator,
    };
    pub use crate::numeric::BigFloat;
}
