use pagerank_core::ComputationError;
use thiserror::Error;

/// Problems with the run configuration, including the command line it was read from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Command {0} is not recognized")]
    WrongCommand(String),

    #[error("Option {0} is not recognized")]
    WrongOption(String),

    #[error("Option {0} has no value")]
    NoValue(String),

    #[error("Value {0} is badly formed or out of range")]
    BadValue(String),

    #[error("Dumping factor {0} needs to be between 0 and 1 (exclusive)")]
    BadDumpingFactor(f64),

    #[error("Thread count {0} must be positive")]
    BadThreadCount(usize),

    #[error("Matrix dimensions {rows}x{cols} must be positive and square")]
    BadDimensions { rows: usize, cols: usize },
}

/// Problems with the source the transition matrix is read from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Source {path} cannot be read: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Source {0} is empty")]
    Empty(String),

    #[error("Source is malformed at line {line}: {token}")]
    Malformed { line: usize, token: String },
}

/// Every way a PageRank run can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageRankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Computation error: {0}")]
    Computation(#[from] ComputationError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Worker {worker} panicked during a sweep")]
    WorkerPanicked { worker: usize },

    #[error("Worker {worker} could not be started: {reason}")]
    ThreadSpawn { worker: usize, reason: String },
}

impl PageRankError {
    /// Process exit status for this error. Distinct and nonzero per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            PageRankError::Config(err) => match err {
                ConfigError::WrongCommand(_) => 1,
                ConfigError::WrongOption(_) => 2,
                ConfigError::NoValue(_) => 3,
                ConfigError::BadValue(_) => 4,
                ConfigError::BadDumpingFactor(_) => 5,
                ConfigError::BadThreadCount(_) => 6,
                ConfigError::BadDimensions { .. } => 7,
            },
            PageRankError::Computation(err) => match err {
                ComputationError::OutOfBounds { .. } => 8,
                ComputationError::DimensionMismatch { .. } => 9,
                ComputationError::Allocation { .. } => 10,
                ComputationError::DataLength { .. } => 11,
            },
            PageRankError::Source(err) => match err {
                SourceError::Unreadable { .. } => 12,
                SourceError::Empty(_) => 13,
                SourceError::Malformed { .. } => 14,
            },
            PageRankError::WorkerPanicked { .. } => 15,
            PageRankError::ThreadSpawn { .. } => 16,
        }
    }
}
