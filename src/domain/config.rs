// ============================================================================
// Computation Configuration
// Caller-facing settings for a pi computation run
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reduction fan-out used when the caller does not choose one.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Configuration for a single computation run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputeConfig {
    /// Decimal digits of pi to compute (must be positive)
    pub digits: u64,

    /// Number of reduction partitions / worker threads.
    /// Zero is tolerated and treated as one.
    pub worker_count: usize,

    /// Pin pool workers to CPU cores (only effective with the `numa` feature)
    pub pin_workers: bool,
}

impl ComputeConfig {
    /// Create a new configuration with the default worker count
    pub fn new(digits: u64) -> Self {
        Self {
            digits,
            worker_count: DEFAULT_WORKER_COUNT,
            pin_workers: false,
        }
    }

    /// Builder method: Set reduction worker count
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Builder method: Pin pool workers to CPU cores
    pub fn with_pinned_workers(mut self, pin: bool) -> Self {
        self.pin_workers = pin;
        self
    }

    /// Worker count actually used: at least one.
    pub fn effective_worker_count(&self) -> usize {
        self.worker_count.max(1)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.digits == 0 {
            return Err("Digit count must be positive".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl ComputeConfig {
    /// Single-threaded run, mostly useful as a reference
    pub fn sequential(digits: u64) -> Self {
        Self::new(digits).with_worker_count(1)
    }

    /// One reduction worker per available CPU, pinned
    pub fn benchmark(digits: u64) -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(DEFAULT_WORKER_COUNT);

        Self::new(digits)
            .with_worker_count(cpus)
            .with_pinned_workers(true)
    }
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = ComputeConfig::new(100);
        assert_eq!(config.digits, 100);
        assert_eq!(config.worker_count, DEFAULT_WORKER_COUNT);
        assert!(!config.pin_workers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ComputeConfig::new(50)
            .with_worker_count(8)
            .with_pinned_workers(true);

        assert_eq!(config.worker_count, 8);
        assert!(config.pin_workers);
    }

    #[test]
    fn test_validation() {
        assert!(ComputeConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_zero_workers_clamped() {
        let config = ComputeConfig::new(10).with_worker_count(0);
        assert_eq!(config.effective_worker_count(), 1);
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(ComputeConfig::sequential(10).worker_count, 1);
        assert!(ComputeConfig::benchmark(10).effective_worker_count() >= 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = ComputeConfig::new(200).with_worker_count(2);
        let json = serde_json::to_string(&config).unwrap();
        let back: ComputeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
