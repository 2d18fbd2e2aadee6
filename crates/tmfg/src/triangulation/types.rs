//! Core types for the triangulation: cliques, separators, output modes,
//! and the result structs handed back to callers.

use std::str::FromStr;

use nalgebra::DMatrix;

use crate::error::Error;

/// Vertex index in `[0, N)`.
pub type Vertex = usize;

/// Tetrahedral clique: the inserted vertex first, then the consumed face.
/// The seed clique keeps the selector's ascending order.
pub type Clique = [Vertex; 4];

/// Separator: the triangular face consumed when a clique was formed.
pub type Separator = [Vertex; 3];

/// Open triangular face on the frontier (a candidate insertion site).
pub type Face = [Vertex; 3];

/// Which matrix the projector assembles from the finished triangulation.
///
/// The selector is a closed enumeration; an unrecognized string is an
/// [`Error::InvalidMode`], never a silent default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Sparse approximate precision matrix via local-global inversion.
    InverseCovariance,
    /// Binary adjacency of the triangulated structure.
    UnweightedSparse,
    /// Adjacency carrying the original pairwise weights.
    WeightedSparse,
}

impl OutputMode {
    /// Selector string, round-trips with [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::InverseCovariance => "inverse_covariance",
            OutputMode::UnweightedSparse => "unweighted_sparse",
            OutputMode::WeightedSparse => "weighted_sparse",
        }
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "inverse_covariance" => Ok(OutputMode::InverseCovariance),
            "unweighted_sparse" => Ok(OutputMode::UnweightedSparse),
            "weighted_sparse" => Ok(OutputMode::WeightedSparse),
            other => Err(Error::InvalidMode(other.to_owned())),
        }
    }
}

/// Finished greedy triangulation, before any output projection.
///
/// Invariants for input size `n >= 4`:
/// - `cliques.len() == n - 3` (seed first, then insertion order),
/// - `separators.len() == n - 4`,
/// - `peo` is a permutation of `0..n` (seed vertices first),
/// - `retained` is symmetric with zero diagonal and `3n - 6` retained edges.
#[derive(Clone, Debug)]
pub struct Triangulation {
    pub cliques: Vec<Clique>,
    pub separators: Vec<Separator>,
    /// Perfect elimination order: insertion order of all vertices.
    pub peo: Vec<Vertex>,
    /// Retained-weight accumulator P: original weight of every in-clique edge.
    pub retained: DMatrix<f64>,
}

impl Triangulation {
    /// Number of vertices of the underlying weight matrix.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.peo.len()
    }
}

/// Triangulation plus the projected output matrix for the selected mode.
#[derive(Clone, Debug)]
pub struct Tmfg {
    pub triangulation: Triangulation,
    /// Output matrix J; symmetric, zero diagonal in every mode.
    pub j: DMatrix<f64>,
}
