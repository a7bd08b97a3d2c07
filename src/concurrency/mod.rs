// ============================================================================
// Concurrency Module
// Worker pool, join barriers and index partitioning
// ============================================================================

mod partition;
mod worker_pool;

pub use partition::{partition_bounds, split_partitions_mut};
pub use worker_pool::{AbortSignal, Task, WorkerPool};
