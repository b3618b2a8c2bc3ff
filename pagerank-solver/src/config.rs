use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the power iteration is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    #[default]
    Serial,
    Parallel,
}

/// Validated parameters of one PageRank run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Weight `d` of link-following against teleportation, in (0, 1).
    pub dumping_factor: f64,
    /// Fixed number of sweeps. There is no convergence test.
    pub iterations: usize,
    /// Dimensions (rows, cols) of the transition matrix.
    pub dims: (usize, usize),
    /// Worker count, only used in parallel mode.
    pub threads: usize,
    pub mode: ExecutionMode,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            dumping_factor: 0.5,
            iterations: 1,
            dims: (2, 2),
            threads: 1,
            mode: ExecutionMode::Serial,
        }
    }
}

impl PageRankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dumping_factor(mut self, dumping_factor: f64) -> Self {
        self.dumping_factor = dumping_factor;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_dims(mut self, rows: usize, cols: usize) -> Self {
        self.dims = (rows, cols);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the invariants every solver relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN is rejected too.
        if !(self.dumping_factor > 0.0 && self.dumping_factor < 1.0) {
            return Err(ConfigError::BadDumpingFactor(self.dumping_factor));
        }
        let (rows, cols) = self.dims;
        if rows == 0 || cols == 0 || rows != cols {
            return Err(ConfigError::BadDimensions { rows, cols });
        }
        if self.mode == ExecutionMode::Parallel && self.threads == 0 {
            return Err(ConfigError::BadThreadCount(self.threads));
        }
        Ok(())
    }
}
