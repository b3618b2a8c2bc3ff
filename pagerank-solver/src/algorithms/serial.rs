use log::{debug, info};
use pagerank_core::ops;

use super::{PowerIterationMetadata, PowerIterationProblem, SolveAlgorithm, SolveResult};
use crate::error::PageRankError;

/// Single-threaded reference solver.
///
/// Each sweep computes a fresh product `W'·x`, adds `b` in place and replaces
/// `x` with the result. Fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct SerialPowerIteration {
    pub iterations: usize,
}

impl SerialPowerIteration {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl SolveAlgorithm for SerialPowerIteration {
    type Metadata = PowerIterationMetadata;

    fn name(&self) -> &'static str {
        "serial"
    }

    fn solve(
        &self,
        problem: &PowerIterationProblem,
    ) -> Result<SolveResult<f64, Self::Metadata>, PageRankError> {
        self.validate_inputs(problem)?;
        info!(
            "Serial power iteration: {} nodes, {} sweeps",
            problem.dimension(),
            self.iterations
        );

        let mut x = problem.initial().clone();
        let mut last_delta = 0.0;
        for sweep in 0..self.iterations {
            let mut next = problem.scaled().multiply(&x)?;
            next.add_assign(problem.teleport())?;
            last_delta = ops::l1_distance(next.data(), x.data())?;
            x = next;
            debug!("Sweep {} done, delta {:e}", sweep + 1, last_delta);
        }

        Ok(SolveResult {
            x: x.into_data(),
            metadata: PowerIterationMetadata {
                sweeps: self.iterations,
                last_delta,
                threads: 1,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerank_core::DenseMatrix;

    #[test]
    fn test_zero_iterations_returns_initial_vector() {
        let w = DenseMatrix::from_rows(&[vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        let problem = PowerIterationProblem::new(&w, 0.85).unwrap();
        let result = SerialPowerIteration::new(0).solve(&problem).unwrap();
        assert_eq!(result.x, vec![0.0, 0.0]);
        assert_eq!(result.metadata.sweeps, 0);
        assert_eq!(result.metadata.last_delta, 0.0);
    }

    #[test]
    fn test_first_sweep_is_teleport_vector() {
        let w = DenseMatrix::from_rows(&[vec![0.2, 0.8], vec![0.8, 0.2]]).unwrap();
        let problem = PowerIterationProblem::new(&w, 0.6).unwrap();
        let result = SerialPowerIteration::new(1).solve(&problem).unwrap();
        // W'·0 = 0, so x_1 = b.
        assert_eq!(result.x, vec![1.0 - 0.6, 1.0 - 0.6]);
        assert_eq!(result.metadata.threads, 1);
    }

    #[test]
    fn test_one_by_one_sequence() {
        // x_{k+1} = 0.5·x_k + 0.5, so x_k = 1 - 0.5^k.
        let w = DenseMatrix::from_rows(&[vec![1.0]]).unwrap();
        let problem = PowerIterationProblem::new(&w, 0.5).unwrap();
        for k in 1..10 {
            let result = SerialPowerIteration::new(k).solve(&problem).unwrap();
            assert_eq!(result.x, vec![1.0 - 0.5f64.powi(k as i32)]);
        }
    }
}
