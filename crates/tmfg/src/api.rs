//! Curated re-export surface (UNSTABLE).
//!
//! Convenience imports for experiments and downstream glue; the crate makes
//! no stability promise for this module.

// Triangulation pipeline
pub use crate::triangulation::{
    best_gain, build_tmfg, max_weight_clique, triangulate, Clique, Face, FaceGainTracker,
    GainRecord, OutputMode, Separator, Tmfg, Triangulation, Vertex,
};
// Output assembly
pub use crate::project::project;
// Errors
pub use crate::error::{Error, Result};
// Random input matrices for tests/benches
pub use crate::randmat::{draw_spd, draw_weights, ReplayToken};
