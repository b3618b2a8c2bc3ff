use std::time::Instant;

use log::{info, warn};
use pagerank_core::{ops, ComputationError, DenseMatrix, Matrix};

use crate::algorithms::{
    ParallelPowerIteration, PowerIterationMetadata, PowerIterationProblem, SerialPowerIteration,
    SolveAlgorithm, SolveResult,
};
use crate::config::{ExecutionMode, PageRankConfig};
use crate::error::PageRankError;

/// Column sums further than this from 1 trigger a warning.
pub const STOCHASTIC_TOLERANCE: f64 = 1e-9;

/// Runs PageRank on `transition` as described by `config`.
///
/// Validates the configuration, builds `W' = d·W`, `b` and `x_0`, then hands
/// them to the serial or parallel solver. The first error encountered is
/// returned as-is; nothing is retried.
pub fn pagerank(
    config: &PageRankConfig,
    transition: &DenseMatrix,
) -> Result<SolveResult<f64, PowerIterationMetadata>, PageRankError> {
    config.validate()?;
    if transition.dims() != config.dims {
        return Err(ComputationError::DimensionMismatch {
            operation: "configure",
            left: config.dims,
            right: transition.dims(),
        }
        .into());
    }
    // Non-stochastic input is accepted as-is.
    if !ops::is_column_stochastic(transition, STOCHASTIC_TOLERANCE) {
        warn!("Transition matrix is not column-stochastic, ranks may not converge");
    }

    let problem = PowerIterationProblem::new(transition, config.dumping_factor)?;
    match config.mode {
        ExecutionMode::Serial => run(&SerialPowerIteration::new(config.iterations), &problem),
        ExecutionMode::Parallel => run(
            &ParallelPowerIteration::with_params(config.iterations, config.threads),
            &problem,
        ),
    }
}

fn run<A>(
    algorithm: &A,
    problem: &PowerIterationProblem,
) -> Result<SolveResult<f64, A::Metadata>, PageRankError>
where
    A: SolveAlgorithm,
{
    let start = Instant::now();
    let result = algorithm.solve(problem)?;
    info!(
        "PageRank ({}) finished in {:?}: {:?}",
        algorithm.name(),
        start.elapsed(),
        result.metadata
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn swap_matrix() -> DenseMatrix {
        DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_rejects_dumping_factor_at_bounds() {
        for d in [0.0, 1.0] {
            let config = PageRankConfig::new().with_dumping_factor(d);
            let err = pagerank(&config, &swap_matrix()).unwrap_err();
            assert_eq!(err, PageRankError::Config(ConfigError::BadDumpingFactor(d)));
        }
    }

    #[test]
    fn test_rejects_matrix_not_matching_config() {
        let config = PageRankConfig::new().with_dims(3, 3);
        let err = pagerank(&config, &swap_matrix()).unwrap_err();
        assert!(matches!(
            err,
            PageRankError::Computation(ComputationError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_dispatches_on_mode() {
        let serial = PageRankConfig::new().with_iterations(5);
        let parallel = serial
            .clone()
            .with_mode(ExecutionMode::Parallel)
            .with_threads(2);

        let s = pagerank(&serial, &swap_matrix()).unwrap();
        let p = pagerank(&parallel, &swap_matrix()).unwrap();
        assert_eq!(s.metadata.threads, 1);
        assert_eq!(p.metadata.threads, 2);
        assert_eq!(s.x, p.x);
    }

    #[test]
    fn test_accepts_non_stochastic_matrix() {
        let w = DenseMatrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let config = PageRankConfig::new().with_iterations(3);
        assert!(pagerank(&config, &w).is_ok());
    }
}
