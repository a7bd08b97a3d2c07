// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod observer;
mod term_generator;

pub use observer::{LoggingObserver, NoOpObserver, PipelineEvent, PipelineObserver};
pub use term_generator::TermGenerator;
