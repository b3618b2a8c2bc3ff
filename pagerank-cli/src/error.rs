use derive_more::From;
use pagerank_solver::{ComputationError, ConfigError, PageRankError, SourceError};

pub type Result<T> = core::result::Result<T, CliError>;

#[derive(Debug, From)]
pub enum CliError {
    #[from]
    PageRank(PageRankError),

    // -- Externals
    #[from]
    Io(std::io::Error),

    #[from]
    Output(serde_json::Error),
}

impl CliError {
    /// Process exit status: the solver's code, or 17 when the report cannot be written.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::PageRank(err) => u8::try_from(err.exit_code()).unwrap_or(u8::MAX),
            CliError::Io(_) | CliError::Output(_) => 17,
        }
    }

    /// Command-line mistakes are followed by the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::PageRank(PageRankError::Config(_)))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::PageRank(err.into())
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        CliError::PageRank(err.into())
    }
}

impl From<ComputationError> for CliError {
    fn from(err: ComputationError) -> Self {
        CliError::PageRank(err.into())
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for CliError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            CliError::PageRank(err) => write!(fmt, "{err}"),
            CliError::Io(err) => write!(fmt, "Cannot write the report: {err}"),
            CliError::Output(err) => write!(fmt, "Cannot serialize the report: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

// endregion: --- Error Boilerplate
