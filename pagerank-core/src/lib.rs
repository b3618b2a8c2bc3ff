//! # PageRank Core Library
//!
//! Provides the dense matrix/vector store and the checked arithmetic that the
//! power-iteration solvers are built on.

pub mod dense_matrix;
pub mod error;
pub mod ops;
pub mod traits;

pub use dense_matrix::DenseMatrix;
pub use error::ComputationError;
pub use traits::Matrix;
