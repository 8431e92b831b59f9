//! Parallel batch settings
//!
//! `num_workers = 0` runs batches on rayon's global pool; any other value
//! builds a dedicated pool of that size when the engine is built.
//! Without the `parallel` feature every batch runs sequentially and
//! `enable_rayon` is accepted but has no effect.

#[cfg(feature = "parallel")]
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

#[cfg(feature = "parallel")]
pub use rayon::ThreadPool;

/// Uninhabited stand-in for rayon's pool; `build_pool` can only return `None`
#[cfg(not(feature = "parallel"))]
#[derive(Debug)]
pub enum ThreadPool {}

/// Parallel processing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Number of workers (0=global pool, 1..=256)
    pub num_workers: usize,

    /// Records per rayon task (1..=10000)
    pub batch_size: usize,

    /// Enable Rayon parallel iterator
    pub enable_rayon: bool,

    /// Worker stack size in MB (1..=64)
    pub stack_size_mb: usize,
}

impl ParallelConfig {
    /// Single-threaded, row by row
    pub fn sequential() -> Self {
        Self {
            enable_rayon: false,
            ..Self::default()
        }
    }

    pub fn num_workers(mut self, workers: usize) -> Self {
        self.num_workers = workers;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Threads that will actually run a batch
    #[cfg(feature = "parallel")]
    pub fn effective_workers(&self) -> usize {
        match (self.enable_rayon, self.num_workers) {
            (false, _) => 1,
            (true, 0) => rayon::current_num_threads().max(1),
            (true, n) => n.min(num_cpus::get().max(1) * 4),
        }
    }

    #[cfg(not(feature = "parallel"))]
    pub fn effective_workers(&self) -> usize {
        1
    }

    /// Dedicated pool, or `None` when the global pool (or no pool) is used
    #[cfg(feature = "parallel")]
    pub fn build_pool(&self) -> ConfigResult<Option<ThreadPool>> {
        if !self.enable_rayon || self.num_workers == 0 {
            return Ok(None);
        }

        ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .stack_size(self.stack_size_mb * 1024 * 1024)
            .thread_name(|i| format!("metastate-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| ConfigError::Custom(format!("Failed to build thread pool: {}", e)))
    }

    #[cfg(not(feature = "parallel"))]
    pub fn build_pool(&self) -> ConfigResult<Option<ThreadPool>> {
        Ok(None)
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            batch_size: 100,
            enable_rayon: true,
            stack_size_mb: 8,
        }
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=global pool)",
            ));
        }

        if self.batch_size < 1 || self.batch_size > 10000 {
            return Err(ConfigError::range_with_hint(
                "batch_size",
                self.batch_size,
                1,
                10000,
                "Batch size must be reasonable",
            ));
        }

        if self.stack_size_mb < 1 || self.stack_size_mb > 64 {
            return Err(ConfigError::range_with_hint(
                "stack_size_mb",
                self.stack_size_mb,
                1,
                64,
                "Stack size must be reasonable",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}
