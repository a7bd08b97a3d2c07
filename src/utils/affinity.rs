// ============================================================================
// CPU Affinity
// Optional pinning of pool workers to CPU cores
// ============================================================================
//
// Pinning keeps a long-running compute loop on one core so its working set
// stays in that core's caches. It only pays off when there are no more
// workers than cores; the plan below wraps round-robin otherwise.
//
// Real pinning needs the `numa` feature; without it the pin call is a no-op
// and reports `false`.
// ============================================================================

/// Core IDs available to this process.
#[cfg(feature = "numa")]
pub(crate) fn available_cores() -> Vec<usize> {
    core_affinity::get_core_ids()
        .unwrap_or_default()
        .into_iter()
        .map(|id| id.id)
        .collect()
}

/// Core IDs available to this process.
///
/// **Note:** Without the `numa` feature this is `0..available_parallelism`.
#[cfg(not(feature = "numa"))]
pub(crate) fn available_cores() -> Vec<usize> {
    let num_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    (0..num_cpus).collect()
}

/// Assign a core to each of `worker_count` workers, round-robin.
pub fn core_plan(worker_count: usize) -> Vec<usize> {
    let cores = available_cores();
    if cores.is_empty() {
        return Vec::new();
    }

    (0..worker_count).map(|i| cores[i % cores.len()]).collect()
}

/// Pin the current thread to `core_id`.
///
/// Returns `false` if the core doesn't exist or pinning failed.
#[cfg(feature = "numa")]
pub fn pin_current_thread_to_core(core_id: usize) -> bool {
    core_affinity::get_core_ids()
        .unwrap_or_default()
        .into_iter()
        .find(|id| id.id == core_id)
        .map(core_affinity::set_for_current)
        .unwrap_or(false)
}

/// Pin the current thread to `core_id`.
///
/// **Note:** This is a no-op stub. Enable the `numa` feature for actual CPU pinning.
#[cfg(not(feature = "numa"))]
pub fn pin_current_thread_to_core(_core_id: usize) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_plan_wraps() {
        let cores = available_cores();
        if cores.is_empty() {
            return;
        }

        let plan = core_plan(cores.len() * 2 + 1);
        assert_eq!(plan.len(), cores.len() * 2 + 1);
        assert_eq!(plan[0], plan[cores.len()]);
        assert!(plan.iter().all(|c| cores.contains(c)));
    }

    #[test]
    fn test_core_plan_empty() {
        assert!(core_plan(0).is_empty());
    }

    #[cfg(not(feature = "numa"))]
    #[test]
    fn test_pin_is_noop_without_feature() {
        assert!(!pin_current_thread_to_core(0));
    }
}
