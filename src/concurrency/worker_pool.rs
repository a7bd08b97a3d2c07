// ============================================================================
// Worker Pool
// Bounded fan-out of compute tasks with an explicit join barrier
// ============================================================================

use crate::error::{PiError, PiResult};
use crate::utils::{available_cores, core_plan, pin_current_thread_to_core};
use crossbeam::queue::SegQueue;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag raised when any task of a phase fails.
///
/// Long-running tasks poll it between steps and bail out with
/// [`PiError::Aborted`] once a sibling has failed.
#[derive(Debug, Default)]
pub struct AbortSignal(AtomicBool);

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// `Err(Aborted)` once raised.
    #[inline]
    pub fn check(&self) -> PiResult<()> {
        if self.is_raised() {
            Err(PiError::Aborted)
        } else {
            Ok(())
        }
    }
}

/// A unit of work for [`WorkerPool::run_all`].
pub type Task<'env, T> = Box<dyn FnOnce(&AbortSignal) -> PiResult<T> + Send + 'env>;

/// Queued task tagged with its position in the phase.
type Queued<'env, T> = (usize, Task<'env, T>);

/// Runs one phase's tasks on a bounded set of scoped OS threads and joins
/// them all.
///
/// Tasks may borrow from the caller's stack; every task has finished by the
/// time [`run_all`](Self::run_all) returns, which makes each call a join
/// barrier between pipeline phases. At most `max_threads` threads work on a
/// phase (the calling thread included), however many tasks it has.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    pin_workers: bool,
    max_threads: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WorkerPool {
    /// Pool bounded by the number of available cores.
    pub fn new(pin_workers: bool) -> Self {
        Self {
            pin_workers,
            max_threads: available_cores().len().max(1),
        }
    }

    /// Builder method: Set the thread bound (zero is treated as one)
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads.max(1);
        self
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Run `tasks` concurrently and wait for all of them.
    ///
    /// The first task runs on the calling thread, which then helps drain the
    /// shared queue alongside up to `max_threads - 1` spawned threads. If the
    /// OS refuses a thread the phase carries on with the threads it has.
    /// Results come back in task order. If any task fails or panics, the
    /// abort signal is raised, queued tasks are skipped and the root-cause
    /// error is returned (a sibling's `Aborted` never masks it).
    pub fn run_all<'env, T>(
        &self,
        phase: &'static str,
        tasks: Vec<Task<'env, T>>,
    ) -> PiResult<Vec<T>>
    where
        T: Send + 'env,
    {
        let task_count = tasks.len();
        let mut tasks = tasks.into_iter().enumerate();
        let Some((_, first)) = tasks.next() else {
            return Ok(Vec::new());
        };

        let queue: SegQueue<Queued<'env, T>> = SegQueue::new();
        for queued in tasks {
            queue.push(queued);
        }

        let helpers = (self.max_threads - 1).min(task_count - 1);
        let signal = AbortSignal::new();
        let cores = if self.pin_workers {
            core_plan(helpers + 1)
        } else {
            Vec::new()
        };

        let outcome = crossbeam::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(helpers);
            for slot in 1..=helpers {
                let queue = &queue;
                let signal = &signal;
                let core = cores.get(slot).copied();
                let spawned = scope
                    .builder()
                    .name(format!("{}-{}", phase, slot))
                    .spawn(move |_| {
                        if let Some(core) = core {
                            if !pin_current_thread_to_core(core) {
                                tracing::trace!(phase, core, "worker not pinned");
                            }
                        }
                        drain(phase, queue, signal)
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        tracing::warn!(
                            phase,
                            error = %err,
                            threads = handles.len() + 1,
                            "thread spawn refused, continuing with fewer threads"
                        );
                        break;
                    },
                }
            }

            let mut finished = vec![(0, guarded(phase, &signal, first))];
            finished.extend(drain(phase, &queue, &signal));
            for handle in handles {
                match handle.join() {
                    Ok(results) => finished.extend(results),
                    Err(_) => signal.raise(),
                }
            }
            finished
        });

        let mut finished = outcome.map_err(|_| PiError::WorkerPanicked { phase })?;
        tracing::debug!(phase, tasks = task_count, "join barrier reached");

        // A worker that died outside a task takes its results with it.
        let mut failure = if finished.len() < task_count {
            Some(PiError::WorkerPanicked { phase })
        } else {
            None
        };

        finished.sort_unstable_by_key(|(index, _)| *index);
        let mut values = Vec::with_capacity(task_count);
        for (_, result) in finished {
            match result {
                Ok(value) => values.push(value),
                Err(err) => {
                    failure = match failure {
                        None | Some(PiError::Aborted) => Some(err),
                        prior => prior,
                    };
                },
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(values),
        }
    }
}

/// Pop and run queued tasks until the queue is empty. Once the signal is
/// raised the remaining tasks are dropped unrun and reported as `Aborted`.
fn drain<'env, T>(
    phase: &'static str,
    queue: &SegQueue<Queued<'env, T>>,
    signal: &AbortSignal,
) -> Vec<(usize, PiResult<T>)> {
    let mut finished = Vec::new();
    while let Some((index, task)) = queue.pop() {
        let result = if signal.is_raised() {
            Err(PiError::Aborted)
        } else {
            guarded(phase, signal, task)
        };
        finished.push((index, result));
    }
    finished
}

/// Run one task, turning a panic into an error and raising the signal on
/// failure.
fn guarded<T>(
    phase: &'static str,
    signal: &AbortSignal,
    task: Task<'_, T>,
) -> PiResult<T> {
    let result = catch_unwind(AssertUnwindSafe(|| task(signal)))
        .unwrap_or(Err(PiError::WorkerPanicked { phase }));

    if let Err(err) = &result {
        if *err != PiError::Aborted {
            tracing::warn!(phase, error = %err, "task failed, aborting siblings");
        }
        signal.raise();
    }

    result
}
