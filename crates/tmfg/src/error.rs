//! Error taxonomy for TMFG construction and projection.
//!
//! Every failure is detected eagerly and aborts the whole run; callers only
//! ever see cliques/separators/J on full success.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a TMFG or projecting its output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Weight matrix is not square.
    #[error("weight matrix must be square, got {rows}x{cols}")]
    NonSquareWeights {
        /// Row count of the offending matrix.
        rows: usize,
        /// Column count of the offending matrix.
        cols: usize,
    },

    /// Covariance matrix shape does not match the weight matrix.
    #[error("covariance matrix is {rows}x{cols} but weight matrix is {n}x{n}")]
    CovarianceDimension {
        /// Row count of the covariance matrix.
        rows: usize,
        /// Column count of the covariance matrix.
        cols: usize,
        /// Side length of the weight matrix.
        n: usize,
    },

    /// Inverse-covariance output selected without a covariance matrix.
    #[error("inverse-covariance output requires a covariance matrix")]
    MissingCovariance,

    /// Fewer than 4 vertices: no seed clique exists.
    #[error("TMFG needs at least 4 vertices, got {n}")]
    TooFewVertices {
        /// Side length of the weight matrix.
        n: usize,
    },

    /// A clique or separator covariance block is not invertible.
    #[error("covariance submatrix for {kind} {index} is singular")]
    SingularSubmatrix {
        /// Either `"clique"` or `"separator"`.
        kind: &'static str,
        /// Position of the block in its list.
        index: usize,
    },

    /// Output-mode selector outside the closed three-value enumeration.
    #[error("unrecognized output mode '{0}'")]
    InvalidMode(String),
}
