// ============================================================================
// Utilities Module
// Helper functions for thread placement
// ============================================================================

mod affinity;

pub(crate) use affinity::available_cores;
pub use affinity::{core_plan, pin_current_thread_to_core};
