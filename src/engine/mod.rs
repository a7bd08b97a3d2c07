// ============================================================================
// Engine Module
// The Chudnovsky pipeline: generators, combiner, reducer, assembler
// ============================================================================

pub mod assembler;
pub mod combiner;
pub mod generators;
mod pipeline;
pub mod reducer;
pub mod reference;

pub use generators::{
    standard_generators, AlternatingPowerGenerator, Factorial3kGenerator, Factorial6kGenerator,
    FactorialCubedGenerator, LinearCoefficientGenerator,
};
#[cfg(feature = "async")]
pub use pipeline::compute_pi_async;
pub use pipeline::{compute_pi, PiEngine};
pub use reference::direct_series_pi;
