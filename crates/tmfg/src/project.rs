//! Output projection over the finished clique/separator lists.
//!
//! All three modes are the same scatter pattern over vertex-index blocks and
//! differ only in the per-cell combine: assign 1, copy the original weight,
//! or accumulate signed covariance-block inverses (the local-global rule).
//! The diagonal of J is forced to 0 in every mode.

use nalgebra::{DMatrix, Matrix3, Matrix4};

use crate::error::{Error, Result};
use crate::triangulation::{OutputMode, Triangulation, Vertex};

/// Assemble the output matrix J for `mode`.
///
/// `weights` is the caller's original matrix (pre-diagonal-zeroing); only the
/// weighted mode reads it. `cov` is read only by the inverse-covariance mode
/// and must match the weight matrix's dimension.
pub fn project(
    tri: &Triangulation,
    weights: &DMatrix<f64>,
    cov: Option<&DMatrix<f64>>,
    mode: OutputMode,
) -> Result<DMatrix<f64>> {
    let n = tri.num_vertices();
    let mut j = DMatrix::zeros(n, n);
    match mode {
        OutputMode::UnweightedSparse => {
            for c in &tri.cliques {
                scatter_block(&mut j, c, |_, _| 1.0, Combine::Assign);
            }
        }
        OutputMode::WeightedSparse => {
            for c in &tri.cliques {
                scatter_block(&mut j, c, |a, b| weights[(c[a], c[b])], Combine::Assign);
            }
        }
        OutputMode::InverseCovariance => {
            let cov = cov.ok_or(Error::MissingCovariance)?;
            let (rows, cols) = cov.shape();
            if rows != n || cols != n {
                return Err(Error::CovarianceDimension { rows, cols, n });
            }
            local_global(&mut j, tri, cov)?;
        }
    }
    j.fill_diagonal(0.0);
    Ok(j)
}

enum Combine {
    Assign,
    Add,
}

/// Scatter `cell(a, b)` (local block indices) over every ordered pair of
/// `verts`. Diagonal cells are written too; the caller zeroes J's diagonal
/// once at the end.
fn scatter_block<const K: usize>(
    j: &mut DMatrix<f64>,
    verts: &[Vertex; K],
    cell: impl Fn(usize, usize) -> f64,
    combine: Combine,
) {
    for a in 0..K {
        for b in 0..K {
            let rc = (verts[a], verts[b]);
            match combine {
                Combine::Assign => j[rc] = cell(a, b),
                Combine::Add => j[rc] += cell(a, b),
            }
        }
    }
}

/// Junction-tree combination: add each clique's inverted 4x4 covariance
/// block, subtract each separator's inverted 3x3 block. A singular block
/// aborts the run; J never silently carries NaN/Inf cells.
fn local_global(j: &mut DMatrix<f64>, tri: &Triangulation, cov: &DMatrix<f64>) -> Result<()> {
    for (index, c) in tri.cliques.iter().enumerate() {
        let block = Matrix4::from_fn(|a, b| cov[(c[a], c[b])]);
        let inv = block
            .try_inverse()
            .filter(|m| m.iter().all(|x| x.is_finite()))
            .ok_or(Error::SingularSubmatrix {
                kind: "clique",
                index,
            })?;
        scatter_block(j, c, |a, b| inv[(a, b)], Combine::Add);
    }
    for (index, s) in tri.separators.iter().enumerate() {
        let block = Matrix3::from_fn(|a, b| cov[(s[a], s[b])]);
        let inv = block
            .try_inverse()
            .filter(|m| m.iter().all(|x| x.is_finite()))
            .ok_or(Error::SingularSubmatrix {
                kind: "separator",
                index,
            })?;
        scatter_block(j, s, |a, b| -inv[(a, b)], Combine::Add);
    }
    Ok(())
}
