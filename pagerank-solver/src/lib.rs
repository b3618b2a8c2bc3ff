//! `pagerank-solver`: power-iteration PageRank over a dense transition matrix.
//!
//! Two execution strategies implement the same recurrence
//! `x_{k+1} = d·W·x_k + (1-d)·𝟙`, starting from `x_0 = 0`, for a fixed number
//! of sweeps:
//!
//! - [`SerialPowerIteration`], the single-threaded reference;
//! - [`ParallelPowerIteration`], a fixed worker pool with contiguous row
//!   partitioning and a barrier after every sweep.
//!
//! [`pagerank`] validates a [`PageRankConfig`] and dispatches to one of them.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod orchestrator;

pub use algorithms::{
    fixed_point_residual, ParallelPowerIteration, PowerIterationMetadata, PowerIterationProblem,
    SerialPowerIteration, SolveAlgorithm, SolveResult,
};
pub use config::{ExecutionMode, PageRankConfig};
pub use error::{ConfigError, PageRankError, SourceError};
pub use orchestrator::pagerank;

// Re-export from pagerank_core
pub use pagerank_core::{ComputationError, DenseMatrix, Matrix};
