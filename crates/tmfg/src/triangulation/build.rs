//! The greedy insertion loop: seed clique, N-4 vertex insertions, and the
//! bookkeeping (PEO, cliques, separators, retained weights) that the output
//! projector consumes.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::project::project;

use super::gains::FaceGainTracker;
use super::seed::max_weight_clique;
use super::types::{Clique, OutputMode, Tmfg, Triangulation, Vertex};

/// All mutable state of one triangulation run. Created at the start, owned
/// exclusively by that run, consumed by [`BuildState::finish`].
struct BuildState {
    /// Working weight matrix, diagonal zeroed.
    w: DMatrix<f64>,
    placed: Vec<bool>,
    remaining: usize,
    peo: Vec<Vertex>,
    cliques: Vec<Clique>,
    separators: Vec<[Vertex; 3]>,
    retained: DMatrix<f64>,
    tracker: FaceGainTracker,
}

impl BuildState {
    /// Seeded state: seed clique placed, its 4 faces on the frontier with
    /// eagerly computed gains, seed edges retained.
    fn seeded(w: DMatrix<f64>, seed: Clique) -> Self {
        let n = w.ncols();
        let mut st = Self {
            retained: DMatrix::zeros(n, n),
            placed: vec![false; n],
            remaining: n - 4,
            peo: seed.to_vec(),
            cliques: vec![seed],
            separators: Vec::with_capacity(n - 4),
            tracker: FaceGainTracker::new(n),
            w,
        };
        for v in seed {
            st.placed[v] = true;
        }
        st.retain_clique(seed);
        let [a, b, c, d] = seed;
        for face in [[a, b, c], [a, b, d], [a, c, d], [b, c, d]] {
            let slot = st.tracker.push_face(face);
            st.tracker.refresh(slot, &st.w, &st.placed);
        }
        st
    }

    /// Record every edge of `clique` in the retained-weight accumulator.
    fn retain_clique(&mut self, clique: Clique) {
        for a in 0..4 {
            for b in (a + 1)..4 {
                let (i, j) = (clique[a], clique[b]);
                self.retained[(i, j)] = self.w[(i, j)];
                self.retained[(j, i)] = self.w[(j, i)];
            }
        }
    }

    /// One insertion: pick the face with the best cached gain, insert its
    /// cached vertex, re-triangulate around it, refresh invalidated caches.
    /// Returns `None` only if the frontier has no scored face left.
    fn insert_step(&mut self) -> Option<()> {
        let nt = self.tracker.argmax()?;
        let nv = self.tracker.record(nt).best?;
        let sep = self.tracker.face(nt);

        self.peo.push(nv);
        let clique = [nv, sep[0], sep[1], sep[2]];
        self.cliques.push(clique);
        self.separators.push(sep);
        self.retain_clique(clique);

        // One consumed face becomes three faces meeting at nv.
        self.tracker.set_face(nt, [sep[0], sep[1], nv]);
        let c1 = self.tracker.push_face([sep[0], sep[2], nv]);
        let c2 = self.tracker.push_face([sep[1], sep[2], nv]);

        self.placed[nv] = true;
        self.remaining -= 1;

        if self.remaining > 0 {
            // Every slot still caching nv is stale; nt itself is among them.
            for slot in self.tracker.take_stale(nv) {
                self.tracker.refresh(slot, &self.w, &self.placed);
            }
        }
        // Keep the consumed slot out of the argmax until its refresh lands.
        self.tracker.zero_gain(nt);
        if self.remaining > 0 {
            for slot in [nt, c1, c2] {
                self.tracker.refresh(slot, &self.w, &self.placed);
            }
        }
        Some(())
    }

    fn finish(self) -> Triangulation {
        Triangulation {
            cliques: self.cliques,
            separators: self.separators,
            peo: self.peo,
            retained: self.retained,
        }
    }
}

/// Build the greedy triangulation of a square symmetric weight matrix.
///
/// For `n >= 4` this produces `n - 3` cliques, `n - 4` separators, a PEO
/// covering every vertex once, and exactly `3n - 6` retained edges. `n = 4`
/// performs zero insertions: the seed clique is the whole structure.
pub fn triangulate(weights: &DMatrix<f64>) -> Result<Triangulation> {
    let (rows, cols) = weights.shape();
    if rows != cols {
        return Err(Error::NonSquareWeights { rows, cols });
    }
    let n = cols;
    if n < 4 {
        return Err(Error::TooFewVertices { n });
    }

    // The diagonal carries no meaning; zero it so gains and the seed scan
    // never read it.
    let mut w = weights.clone();
    w.fill_diagonal(0.0);

    let seed = max_weight_clique(&w).ok_or(Error::TooFewVertices { n })?;
    let mut st = BuildState::seeded(w, seed);
    for _ in 0..n - 4 {
        let Some(()) = st.insert_step() else {
            break;
        };
    }
    debug_assert!(st.placed.iter().all(|&p| p), "every vertex must be placed");
    debug_assert_eq!(st.tracker.num_faces(), 2 * n - 4);
    Ok(st.finish())
}

/// Triangulate and project in one call: validation, seed selection, the
/// insertion loop, then the output assembly for `mode`.
///
/// `cov` is read only by [`OutputMode::InverseCovariance`]; its absence or a
/// shape mismatch fails before the triangulation starts.
pub fn build_tmfg(
    weights: &DMatrix<f64>,
    cov: Option<&DMatrix<f64>>,
    mode: OutputMode,
) -> Result<Tmfg> {
    let (rows, cols) = weights.shape();
    if rows != cols {
        return Err(Error::NonSquareWeights { rows, cols });
    }
    if mode == OutputMode::InverseCovariance {
        let c = cov.ok_or(Error::MissingCovariance)?;
        let (crows, ccols) = c.shape();
        if crows != cols || ccols != cols {
            return Err(Error::CovarianceDimension {
                rows: crows,
                cols: ccols,
                n: cols,
            });
        }
    }
    let triangulation = triangulate(weights)?;
    let j = project(&triangulation, weights, cov, mode)?;
    Ok(Tmfg { triangulation, j })
}
