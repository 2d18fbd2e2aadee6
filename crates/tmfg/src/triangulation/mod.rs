//! Greedy TMFG triangulation.
//!
//! Purpose
//! - Build the Triangulated Maximal Filtered Graph of a square symmetric
//!   weight matrix: seed clique, then one greedy vertex insertion per
//!   remaining vertex, each consuming one open triangular face.
//! - The finished structure (cliques, separators, PEO, retained weights) is
//!   what [`crate::project`] assembles output matrices from.
//!
//! Determinism
//! - Both argmax sites (face selection, per-face candidate) break ties toward
//!   the lowest index, so identical inputs give bit-identical results.

mod build;
mod gains;
mod seed;
mod types;

pub use build::{build_tmfg, triangulate};
pub use gains::{best_gain, FaceGainTracker, GainRecord};
pub use seed::max_weight_clique;
pub use types::{Clique, Face, OutputMode, Separator, Tmfg, Triangulation, Vertex};

#[cfg(test)]
mod tests;
