//! Triangulated Maximal Filtered Graph (TMFG) construction.
//!
//! From an NxN pairwise weight matrix this crate builds a sparse chordal
//! structure (a maximal planar graph with 3N-6 edges) by greedy triangular
//! insertion, and projects it to one of three outputs: a binary adjacency,
//! a weight-preserving sparse adjacency, or a sparse approximate precision
//! matrix via the local-global (junction-tree) inversion rule.
//!
//! One call is one batch run: validation, seed selection, N-4 insertions,
//! projection. No state survives across calls and partial results are never
//! returned.

pub mod api;
pub mod error;
pub mod project;
pub mod randmat;
pub mod triangulation;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use triangulation::{build_tmfg, triangulate, OutputMode, Tmfg, Triangulation};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::project::project;
    pub use crate::randmat::{draw_spd, draw_weights, ReplayToken};
    pub use crate::triangulation::{
        build_tmfg, triangulate, Clique, OutputMode, Separator, Tmfg, Triangulation, Vertex,
    };
    pub use nalgebra::DMatrix;
}
