use num_traits::Float;
use pagerank_core::{ComputationError, DenseMatrix, Matrix};
use serde::Serialize;

use crate::error::PageRankError;

pub mod parallel;
pub mod serial;

pub use parallel::ParallelPowerIteration;
pub use serial::SerialPowerIteration;

#[derive(Debug, Clone)]
pub struct SolveResult<V: Float, M> {
    pub x: Vec<V>,   // Final rank vector, index-aligned with the matrix rows
    pub metadata: M, // Metadata about the run
}

impl<V: Float, M> SolveResult<V, M> {
    /// Scores rescaled to sum to 1, or `None` if they sum to zero
    /// (e.g. after zero sweeps from the zero vector).
    pub fn normalized(&self) -> Option<Vec<V>> {
        let sum = self.x.iter().fold(V::zero(), |acc, &v| acc + v);
        if sum == V::zero() || !sum.is_finite() {
            return None;
        }
        Some(self.x.iter().map(|&v| v / sum).collect())
    }
}

/// What a power-iteration run reports besides the rank vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerIterationMetadata {
    /// Sweeps actually executed.
    pub sweeps: usize,
    /// L1 norm of `x_k - x_{k-1}` for the final sweep, 0 when no sweep ran.
    /// Informational only, it never ends the iteration early.
    pub last_delta: f64,
    /// Workers used, 1 for the serial solver.
    pub threads: usize,
}

/// Solver state shared by every execution strategy.
///
/// Holds the scaled transition matrix `W' = d·W`, the teleportation vector
/// `b` (every entry `1 - d`) and the starting vector `x_0 = 0`. All three are
/// read-only once built.
#[derive(Debug, Clone)]
pub struct PowerIterationProblem {
    scaled: DenseMatrix,
    teleport: DenseMatrix,
    initial: DenseMatrix,
}

impl PowerIterationProblem {
    /// Builds `W'`, `b` and `x_0` from a square transition matrix.
    pub fn new(transition: &DenseMatrix, dumping_factor: f64) -> Result<Self, ComputationError> {
        if !transition.is_square() {
            return Err(ComputationError::DimensionMismatch {
                operation: "transition",
                left: transition.dims(),
                right: (transition.cols(), transition.rows()),
            });
        }
        let n = transition.rows();
        let mut scaled = transition.clone();
        scaled.scale(dumping_factor);
        Ok(Self {
            scaled,
            teleport: DenseMatrix::filled(n, 1, 1.0 - dumping_factor)?,
            initial: DenseMatrix::zero_vector(n)?,
        })
    }

    pub fn scaled(&self) -> &DenseMatrix {
        &self.scaled
    }

    pub fn teleport(&self) -> &DenseMatrix {
        &self.teleport
    }

    pub fn initial(&self) -> &DenseMatrix {
        &self.initial
    }

    /// Number of nodes.
    pub fn dimension(&self) -> usize {
        self.scaled.rows()
    }
}

// --- Algorithm Trait Definition ---
/// Trait representing one strategy for running the power-iteration recurrence
/// `x_{k+1} = W'·x_k + b`.
pub trait SolveAlgorithm {
    type Metadata: std::fmt::Debug;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Runs the configured number of sweeps and returns the final vector.
    ///
    /// # Errors
    /// Any bounds or dimension violation aborts the whole run.
    fn solve(
        &self,
        problem: &PowerIterationProblem,
    ) -> Result<SolveResult<f64, Self::Metadata>, PageRankError>;

    // Helper for input validation, can be called by implementations.
    fn validate_inputs(&self, problem: &PowerIterationProblem) -> Result<(), ComputationError> {
        let scaled = problem.scaled();
        let n = scaled.rows();
        if !scaled.is_square() {
            return Err(ComputationError::DimensionMismatch {
                operation: "validate",
                left: scaled.dims(),
                right: (scaled.cols(), scaled.rows()),
            });
        }
        for vector in [problem.teleport(), problem.initial()] {
            if vector.dims() != (n, 1) {
                return Err(ComputationError::DimensionMismatch {
                    operation: "validate",
                    left: scaled.dims(),
                    right: vector.dims(),
                });
            }
        }
        Ok(())
    }
}

/// Largest absolute violation of the fixed-point equation
/// `x = d·W·x + (1-d)·𝟙`, i.e. `max_i |d·(W·x)_i + (1-d) - x_i|`.
pub fn fixed_point_residual(
    transition: &DenseMatrix,
    dumping_factor: f64,
    x: &[f64],
) -> Result<f64, ComputationError> {
    let x = DenseMatrix::from_column(x.to_vec())?;
    let mut image = transition.multiply(&x)?;
    image.scale(dumping_factor);
    Ok(image
        .data()
        .iter()
        .zip(x.data())
        .map(|(wx, xi)| (wx + (1.0 - dumping_factor) - xi).abs())
        .fold(0.0, f64::max))
}
