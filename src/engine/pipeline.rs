// ============================================================================
// Pi Engine
// Drives generation, combination, reduction and assembly
// ============================================================================

use super::assembler::assemble;
use super::combiner::combine;
use super::generators::standard_generators;
use super::reducer::{reduce, SeriesTerms};
use crate::concurrency::{AbortSignal, Task, WorkerPool};
use crate::domain::{
    ComputeConfig, DigitBudget, FloatSequence, PiApproximation, TermSequence,
};
use crate::error::PiResult;
use crate::interfaces::{NoOpObserver, PipelineEvent, PipelineObserver, TermGenerator};
use std::sync::Arc;

/// Computes π with the Chudnovsky series.
///
/// Holds no state between runs: every [`compute`](Self::compute) call
/// derives its own budget and owns every buffer it creates.
pub struct PiEngine {
    config: ComputeConfig,
    pool: WorkerPool,
    observer: Arc<dyn PipelineObserver>,
}

impl PiEngine {
    /// Create an engine for `config` with a no-op observer
    pub fn new(config: ComputeConfig) -> Self {
        let pool = WorkerPool::new(config.pin_workers);
        Self {
            config,
            pool,
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Builder method: Attach a progress observer
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    /// - `InvalidDigitCount` before any allocation if `digits` is zero
    /// - `Backend` if the arithmetic layer faults
    /// - `WorkerPanicked` if a pool task panics
    pub fn compute(&self) -> PiResult<PiApproximation> {
        let budget = DigitBudget::new(self.config.digits)?;

        let worker_count = self.config.effective_worker_count();
        if self.config.worker_count == 0 {
            tracing::warn!("worker count of 0 requested, using a single partition");
        }

        tracing::info!(
            digits = budget.digits(),
            iterations = budget.iterations(),
            precision_bits = budget.working_precision_bits(),
            workers = worker_count,
            "starting pi computation"
        );

        let integers = self.generate(&budget)?;
        let floats = self.combine(integers, budget.working_precision_bits())?;
        let terms = SeriesTerms::from_sequences(floats)?;

        let grand_sum = reduce(terms, worker_count, &self.pool, self.observer.as_ref())?;
        let value = assemble(&grand_sum)?;

        self.observer.on_event(PipelineEvent::Assembled {
            digits: budget.digits(),
            precision: budget.working_precision_bits(),
        });
        tracing::info!(digits = budget.digits(), "pi computation finished");

        Ok(PiApproximation::new(value, budget, worker_count))
    }

    /// Phase 1: all five generators at once; the calling thread runs A.
    fn generate(&self, budget: &DigitBudget) -> PiResult<Vec<TermSequence>> {
        let iterations = budget.iterations();
        let observer = self.observer.as_ref();
        let generators = standard_generators();

        let tasks: Vec<Task<'_, TermSequence>> = generators
            .iter()
            .map(|generator| {
                let generator: &dyn TermGenerator = generator.as_ref();
                Box::new(move |signal: &AbortSignal| -> PiResult<TermSequence> {
                    let sequence = generator.generate(iterations, signal)?;
                    tracing::debug!(role = %sequence.role(), "generation finished");
                    observer.on_event(PipelineEvent::GenerationFinished {
                        role: sequence.role(),
                        terms: sequence.len(),
                    });
                    Ok(sequence)
                }) as Task<'_, TermSequence>
            })
            .collect();

        self.pool.run_all("generation", tasks)
    }

    /// Phase 2: one conversion task per sequence.
    fn combine(
        &self,
        integers: Vec<TermSequence>,
        precision: u64,
    ) -> PiResult<Vec<FloatSequence>> {
        let observer = self.observer.as_ref();

        let tasks: Vec<Task<'_, FloatSequence>> = integers
            .into_iter()
            .map(|sequence| {
                Box::new(move |signal: &AbortSignal| -> PiResult<FloatSequence> {
                    let floats = combine(sequence, precision, signal)?;
                    tracing::debug!(role = %floats.role(), precision, "combination finished");
                    observer.on_event(PipelineEvent::CombinationFinished {
                        role: floats.role(),
                        precision,
                    });
                    Ok(floats)
                }) as Task<'_, FloatSequence>
            })
            .collect();

        self.pool.run_all("combination", tasks)
    }
}

/// Compute π to `digits` decimal digits with `worker_count` reduction
/// workers (zero is treated as one).
///
/// # Example
/// ```
/// use chudnovsky_pi::engine::compute_pi;
///
/// let pi = compute_pi(14, 1)?;
/// assert_eq!(pi.to_digit_string(), "3.1415926535897");
/// # Ok::<(), chudnovsky_pi::PiError>(())
/// ```
pub fn compute_pi(digits: u64, worker_count: usize) -> PiResult<PiApproximation> {
    PiEngine::new(ComputeConfig::new(digits).with_worker_count(worker_count)).compute()
}

/// Run [`PiEngine::compute`] on tokio's blocking thread pool.
#[cfg(feature = "async")]
pub async fn compute_pi_async(config: ComputeConfig) -> PiResult<PiApproximation> {
    tokio::task::spawn_blocking(move || PiEngine::new(config).compute())
        .await
        .map_err(|_| crate::error::PiError::WorkerPanicked { phase: "async" })?
}
