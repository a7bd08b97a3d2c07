// ============================================================================
// Pipeline Observer Interface
// Defines the contract for observing computation progress
// ============================================================================

use crate::domain::TermRole;
use std::ops::Range;

/// Progress events emitted by the computation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A term generator filled its sequence
    GenerationFinished { role: TermRole, terms: usize },

    /// A sequence was converted to the working precision
    CombinationFinished { role: TermRole, precision: u64 },

    /// A reduction worker folded its partition into a partial sum
    PartitionReduced {
        partition: usize,
        indices: Range<usize>,
    },

    /// The final constant division produced the result
    Assembled { digits: u64, precision: u64 },
}

/// Observer trait for pipeline progress.
///
/// Called from worker threads, so implementations must be thread-safe.
pub trait PipelineObserver: Send + Sync {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);
}

/// No-op observer
pub struct NoOpObserver;

impl PipelineObserver for NoOpObserver {
    fn on_event(&self, _event: PipelineEvent) {}
}

/// Logging observer
pub struct LoggingObserver;

impl PipelineObserver for LoggingObserver {
    fn on_event(&self, event: PipelineEvent) {
        tracing::debug!("Pipeline event: {:?}", event);
    }
}
