//! End-to-end tests for the triangulation engine: structural invariants,
//! worked small cases, tie-break determinism.

use nalgebra::DMatrix;
use proptest::prelude::*;

use super::*;
use crate::error::Error;
use crate::project::project;
use crate::randmat::{draw_spd, draw_weights, ReplayToken};

fn symmetric(n: usize, entries: &[(usize, usize, f64)]) -> DMatrix<f64> {
    let mut w = DMatrix::zeros(n, n);
    for &(i, j, v) in entries {
        w[(i, j)] = v;
        w[(j, i)] = v;
    }
    w
}

/// Unordered retained-edge count: nonzero cells of the strict upper triangle.
fn edge_count(m: &DMatrix<f64>) -> usize {
    let n = m.ncols();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if m[(i, j)] != 0.0 {
                count += 1;
            }
        }
    }
    count
}

fn assert_is_permutation(peo: &[usize], n: usize) {
    let mut seen = vec![false; n];
    for &v in peo {
        assert!(v < n && !seen[v], "peo must visit each vertex once");
        seen[v] = true;
    }
    assert_eq!(peo.len(), n);
}

#[test]
fn structural_invariants_across_sizes() {
    for n in [4usize, 5, 6, 9, 17, 40] {
        let w = draw_weights(n, ReplayToken { seed: 7, index: n as u64 });
        let tri = triangulate(&w).unwrap();
        assert_eq!(tri.cliques.len(), n - 3);
        assert_eq!(tri.separators.len(), n - 4);
        assert_is_permutation(&tri.peo, n);
        assert_eq!(edge_count(&tri.retained), 3 * n - 6);
        // Every non-seed clique is its separator plus the inserted vertex.
        for (c, s) in tri.cliques[1..].iter().zip(&tri.separators) {
            assert_eq!(&c[1..], s);
        }
        // Insertion order matches the PEO tail.
        for (i, c) in tri.cliques[1..].iter().enumerate() {
            assert_eq!(c[0], tri.peo[4 + i]);
        }
    }
}

#[test]
fn four_vertices_is_just_the_seed() {
    let w = draw_weights(4, ReplayToken { seed: 1, index: 1 });
    let tri = triangulate(&w).unwrap();
    assert_eq!(tri.cliques, vec![[0, 1, 2, 3]]);
    assert!(tri.separators.is_empty());
    assert_eq!(tri.peo, vec![0, 1, 2, 3]);
    // K4: all 6 edges retained.
    assert_eq!(edge_count(&tri.retained), 6);
}

#[test]
fn five_vertex_scenario() {
    let w = symmetric(
        5,
        &[
            (0, 1, 0.9),
            (0, 2, 0.8),
            (1, 2, 0.7),
            (0, 3, 0.1),
            (1, 3, 0.3),
            (2, 3, 0.2),
            (0, 4, 0.2),
            (1, 4, 0.1),
            (2, 4, 0.4),
            (3, 4, 0.6),
        ],
    );
    // Recompute the best of the C(5,4)=5 quadruples exhaustively: each leaves
    // out one vertex.
    let mut expect_seed = [0usize; 4];
    let mut best = f64::NEG_INFINITY;
    for out in 0..5 {
        let q: Vec<usize> = (0..5).filter(|&v| v != out).collect();
        let mut s = 0.0;
        for a in 0..4 {
            for b in (a + 1)..4 {
                s += w[(q[a], q[b])];
            }
        }
        if s > best {
            best = s;
            expect_seed.copy_from_slice(&q);
        }
    }
    let tri = triangulate(&w).unwrap();
    assert_eq!(tri.cliques[0], expect_seed);
    // Exactly one insertion: the left-out vertex joins its best face.
    assert_eq!(tri.cliques.len(), 2);
    assert_eq!(tri.separators.len(), 1);
    let inserted = tri.cliques[1][0];
    assert!(!expect_seed.contains(&inserted));
    assert!(tri.separators[0].iter().all(|v| expect_seed.contains(v)));
    assert_eq!(tri.peo[4], inserted);
    assert_eq!(edge_count(&tri.retained), 3 * 5 - 6);
    // The concrete maximizer for these weights.
    assert_eq!(tri.cliques[0], [0, 1, 2, 4]);
    assert_eq!(tri.cliques[1], [3, 1, 2, 4]);
}

#[test]
fn tie_breaks_are_lowest_index() {
    // All-equal weights: everything ties, so the documented rule fully
    // determines the run.
    let mut w = DMatrix::from_element(6, 6, 0.5);
    w.fill_diagonal(0.0);
    let tri = triangulate(&w).unwrap();
    assert_eq!(tri.cliques[0], [0, 1, 2, 3]);
    // First insertion: lowest unplaced vertex (4) into the lowest face slot
    // (seed face [0, 1, 2]).
    assert_eq!(tri.separators[0], [0, 1, 2]);
    assert_eq!(tri.cliques[1], [4, 0, 1, 2]);
    assert_eq!(tri.peo, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn runs_are_bit_identical() {
    for index in 0..4 {
        let w = draw_weights(15, ReplayToken { seed: 11, index });
        let a = triangulate(&w).unwrap();
        let b = triangulate(&w).unwrap();
        assert_eq!(a.cliques, b.cliques);
        assert_eq!(a.separators, b.separators);
        assert_eq!(a.peo, b.peo);
        assert_eq!(a.retained, b.retained);
        let ja = project(&a, &w, None, OutputMode::WeightedSparse).unwrap();
        let jb = project(&b, &w, None, OutputMode::WeightedSparse).unwrap();
        assert_eq!(ja, jb);
    }
}

#[test]
fn sparse_modes_retain_exactly_3n_minus_6_edges() {
    for n in [4usize, 7, 12, 25] {
        let w = draw_weights(n, ReplayToken { seed: 5, index: n as u64 });
        let tmfg = build_tmfg(&w, None, OutputMode::UnweightedSparse).unwrap();
        assert_eq!(edge_count(&tmfg.j), 3 * n - 6);
        let tmfg = build_tmfg(&w, None, OutputMode::WeightedSparse).unwrap();
        assert_eq!(edge_count(&tmfg.j), 3 * n - 6);
    }
}

#[test]
fn inverse_covariance_end_to_end() {
    let n = 10;
    let w = draw_weights(n, ReplayToken { seed: 2, index: 3 });
    let cov = draw_spd(n, ReplayToken { seed: 2, index: 4 });
    let tmfg = build_tmfg(&w, Some(&cov), OutputMode::InverseCovariance).unwrap();
    let adj = project(
        &tmfg.triangulation,
        &w,
        None,
        OutputMode::UnweightedSparse,
    )
    .unwrap();
    for i in 0..n {
        assert_eq!(tmfg.j[(i, i)], 0.0);
        for k in 0..n {
            assert!(tmfg.j[(i, k)].is_finite());
            assert!((tmfg.j[(i, k)] - tmfg.j[(k, i)]).abs() < 1e-9);
            if i != k && adj[(i, k)] == 0.0 {
                assert_eq!(tmfg.j[(i, k)], 0.0);
            }
        }
    }
}

#[test]
fn degenerate_and_malformed_inputs_fail_eagerly() {
    let w = DMatrix::zeros(3, 3);
    assert_eq!(triangulate(&w).unwrap_err(), Error::TooFewVertices { n: 3 });

    let w = DMatrix::zeros(4, 5);
    assert_eq!(
        triangulate(&w).unwrap_err(),
        Error::NonSquareWeights { rows: 4, cols: 5 }
    );

    let w = draw_weights(6, ReplayToken { seed: 9, index: 0 });
    assert_eq!(
        build_tmfg(&w, None, OutputMode::InverseCovariance).unwrap_err(),
        Error::MissingCovariance
    );
    let cov = DMatrix::identity(4, 4);
    assert_eq!(
        build_tmfg(&w, Some(&cov), OutputMode::InverseCovariance).unwrap_err(),
        Error::CovarianceDimension { rows: 4, cols: 4, n: 6 }
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_random_inputs(n in 4usize..24, seed in any::<u64>()) {
        let w = draw_weights(n, ReplayToken { seed, index: 0 });
        let tri = triangulate(&w).unwrap();
        prop_assert_eq!(tri.cliques.len(), n - 3);
        prop_assert_eq!(tri.separators.len(), n - 4);
        assert_is_permutation(&tri.peo, n);
        prop_assert_eq!(edge_count(&tri.retained), 3 * n - 6);

        let j = project(&tri, &w, None, OutputMode::UnweightedSparse).unwrap();
        prop_assert_eq!(edge_count(&j), 3 * n - 6);
        for i in 0..n {
            prop_assert_eq!(j[(i, i)], 0.0);
            for k in 0..n {
                prop_assert_eq!(j[(i, k)], j[(k, i)]);
            }
        }
    }

    #[test]
    fn weighted_projection_copies_weights(n in 4usize..16, seed in any::<u64>()) {
        let w = draw_weights(n, ReplayToken { seed, index: 1 });
        let tmfg = build_tmfg(&w, None, OutputMode::WeightedSparse).unwrap();
        for i in 0..n {
            for k in 0..n {
                if tmfg.j[(i, k)] != 0.0 {
                    prop_assert_eq!(tmfg.j[(i, k)], w[(i, k)]);
                }
            }
        }
    }
}
