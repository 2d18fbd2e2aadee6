//! Seed clique selection: the 4-vertex clique with maximal total pairwise
//! weight, found by exhaustive enumeration of all C(N,4) quadruples.

use nalgebra::DMatrix;

use super::types::Clique;

/// Sum of the 6 pairwise weights inside a quadruple.
#[inline]
fn quad_weight(w: &DMatrix<f64>, q: Clique) -> f64 {
    let mut s = 0.0;
    for a in 0..4 {
        for b in (a + 1)..4 {
            s += w[(q[a], q[b])];
        }
    }
    s
}

/// Most mutually-connected quadruple of `w` (ascending vertex order).
///
/// Ties keep the first maximizer under ascending lexicographic enumeration,
/// so repeated runs are bit-identical. Returns `None` when `n < 4`; the
/// diagonal of `w` is expected to be zeroed by the caller.
pub fn max_weight_clique(w: &DMatrix<f64>) -> Option<Clique> {
    let n = w.ncols();
    if n < 4 {
        return None;
    }
    let mut best: Option<(Clique, f64)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let q = [i, j, k, l];
                    let s = quad_weight(w, q);
                    // Strict > keeps the lexicographically first maximizer.
                    if best.as_ref().is_none_or(|&(_, b)| s > b) {
                        best = Some((q, s));
                    }
                }
            }
        }
    }
    best.map(|(q, _)| q)
}
