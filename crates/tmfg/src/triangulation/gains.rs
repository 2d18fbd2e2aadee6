//! Per-face gain cache for the greedy insertion loop.
//!
//! Each open triangular face carries a cached best candidate vertex and its
//! gain. Instead of rescanning the whole frontier after every insertion, the
//! engine refreshes only the slots whose cache the insertion invalidated; a
//! lazily-maintained reverse index (vertex -> slots that cached it) finds
//! those slots without a linear scan of all faces.

use nalgebra::DMatrix;

use super::types::{Face, Vertex};

/// Cached best candidate for one face: `(best, gain)`; `best` is `None` when
/// no unplaced vertex remains (gain 0) or the slot has not been scored yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainRecord {
    pub best: Option<Vertex>,
    pub gain: f64,
}

impl GainRecord {
    const UNSCORED: GainRecord = GainRecord {
        best: None,
        gain: 0.0,
    };
}

/// Gain of `v` against face `(a, b, c)`: `W[v,a] + W[v,b] + W[v,c]`, maximized
/// over unplaced vertices; ties keep the lowest vertex index.
pub fn best_gain(w: &DMatrix<f64>, face: Face, placed: &[bool]) -> GainRecord {
    let mut best: Option<Vertex> = None;
    let mut gain = 0.0;
    for v in 0..placed.len() {
        if placed[v] {
            continue;
        }
        let g = w[(v, face[0])] + w[(v, face[1])] + w[(v, face[2])];
        // First candidate always wins; after that, strict > keeps the lowest index.
        if best.is_none() || g > gain {
            best = Some(v);
            gain = g;
        }
    }
    if best.is_none() {
        gain = 0.0;
    }
    GainRecord { best, gain }
}

/// Frontier of open faces with their cached gains.
pub struct FaceGainTracker {
    faces: Vec<Face>,
    records: Vec<GainRecord>,
    // Reverse index: vertex -> slots whose cache pointed at it when last
    // refreshed. Entries go stale when a slot is refreshed again; `take_stale`
    // filters against the current records.
    by_best: Vec<Vec<usize>>,
}

impl FaceGainTracker {
    /// Empty tracker for an `n`-vertex run.
    pub fn new(n: usize) -> Self {
        // The frontier of a maximal planar construction never exceeds 2n - 4 faces.
        let cap = 2 * n.saturating_sub(2);
        Self {
            faces: Vec::with_capacity(cap),
            records: Vec::with_capacity(cap),
            by_best: vec![Vec::new(); n],
        }
    }

    #[inline]
    pub fn face(&self, slot: usize) -> Face {
        self.faces[slot]
    }

    #[inline]
    pub fn record(&self, slot: usize) -> GainRecord {
        self.records[slot]
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Append a face with an unscored record; returns its slot.
    pub fn push_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.records.push(GainRecord::UNSCORED);
        self.faces.len() - 1
    }

    /// Overwrite a face in place (the consumed face is re-triangulated, not
    /// removed). The stale record stays until the engine refreshes the slot.
    pub fn set_face(&mut self, slot: usize, face: Face) {
        self.faces[slot] = face;
    }

    /// Zero a slot's gain so it cannot win the argmax before its refresh.
    pub fn zero_gain(&mut self, slot: usize) {
        self.records[slot].gain = 0.0;
    }

    /// Recompute a slot's cached best candidate against the current frontier.
    pub fn refresh(&mut self, slot: usize, w: &DMatrix<f64>, placed: &[bool]) {
        let rec = best_gain(w, self.faces[slot], placed);
        self.records[slot] = rec;
        if let Some(v) = rec.best {
            self.by_best[v].push(slot);
        }
    }

    /// Slots whose cached best vertex is `v`, ascending and deduplicated.
    /// Consumes the reverse-index bucket for `v` (it never refills: `v` is
    /// placed, so no later refresh can cache it again).
    pub fn take_stale(&mut self, v: Vertex) -> Vec<usize> {
        let mut slots = std::mem::take(&mut self.by_best[v]);
        slots.sort_unstable();
        slots.dedup();
        slots.retain(|&s| self.records[s].best == Some(v));
        slots
    }

    /// Slot with the maximal cached gain; lowest slot index wins ties.
    /// Unscored/terminal slots (no candidate) never win.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (slot, rec) in self.records.iter().enumerate() {
            if rec.best.is_none() {
                continue;
            }
            if best.is_none_or(|(_, g)| rec.gain > g) {
                best = Some((slot, rec.gain));
            }
        }
        best.map(|(slot, _)| slot)
    }
}
