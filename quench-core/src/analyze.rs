//! Per-slice energy analysis and best-slice extraction.
//!
//! The analyzer evaluates every Trotter slice as a classical configuration
//! against the *original* (unnormalized) weights, bins each edge's
//! contribution by arity, and identifies the first minimum-energy slice and
//! its degeneracy. The best slice is then converted into the user-labeled
//! output state.

use std::collections::BTreeMap;

use crate::graph::ProblemGraph;
use crate::kernel::energy_contribution;
use crate::line::TrotterLine;
use crate::state::TrotterState;

/// Per-slice energy histograms plus the minimum-slice summary.
#[derive(Debug, Clone)]
pub struct SliceEnergies {
    /// One histogram per slice: arity → summed contribution; arity 0 holds
    /// the slice total.
    pub histograms: Vec<BTreeMap<usize, f64>>,
    /// Signed sum of all canonical edge weights.
    pub weight_sum: f64,
    /// First slice index attaining the minimal energy.
    pub min_index: usize,
    /// Number of slices attaining the minimal energy.
    pub degen: usize,
}

impl SliceEnergies {
    /// The total energy of slice `t`.
    #[inline]
    pub fn slice_energy(&self, t: usize) -> f64 {
        self.histograms[t][&0]
    }

    /// The energy of the best slice.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.slice_energy(self.min_index)
    }

    /// The maxcut metric, `(Σ_e w_e + energy) / −2`.
    #[inline]
    pub fn maxcut(&self) -> f64 {
        (self.weight_sum + self.energy()) / -2.0
    }

    /// The best slice's histogram.
    #[inline]
    pub fn best_histogram(&self) -> &BTreeMap<usize, f64> {
        &self.histograms[self.min_index]
    }
}

/// Evaluates every slice of `state` against the canonical edges of `graph`.
pub fn analyze_slices(state: &TrotterState, graph: &ProblemGraph) -> SliceEnergies {
    let nt = state.nt();
    let mut histograms: Vec<BTreeMap<usize, f64>> = (0..nt)
        .map(|_| BTreeMap::from([(0usize, 0.0)]))
        .collect();

    let mut alignment = TrotterLine::new(nt);
    let mut weight_sum = 0.0;
    for edge in graph.edges() {
        weight_sum += edge.weight;
        alignment.clear();
        for &v in &edge.verts {
            alignment.xor_assign(state.line(v as usize));
        }
        let arity = edge.arity();
        for (t, hist) in histograms.iter_mut().enumerate() {
            let part = energy_contribution(alignment.get(t), edge.weight);
            *hist.entry(arity).or_insert(0.0) += part;
            *hist.entry(0).or_insert(0.0) += part;
        }
    }

    let mut min_index = 0;
    let mut degen = 1;
    let mut best = histograms[0][&0];
    for (t, hist) in histograms.iter().enumerate().skip(1) {
        let e = hist[&0];
        if e < best {
            best = e;
            min_index = t;
            degen = 1;
        } else if e == best {
            degen += 1;
        }
    }

    SliceEnergies {
        histograms,
        weight_sum,
        min_index,
        degen,
    }
}

/// The classical bit vector of slice `t`; `true` means spin up.
pub fn best_slice_state(state: &TrotterState, t: usize) -> Vec<bool> {
    (0..state.n_vert())
        .map(|i| !state.line(i).get(t))
        .collect()
}

/// Converts a best-slice bit vector into the sorted user-labeled output.
///
/// Reported are the labels whose spin equals the reference orientation:
/// spin up by default, or the first spin's orientation when `first_in` (the
/// canonical choice that quotients out the global Z2 symmetry of field-free
/// problems). Spins without a user label are skipped.
pub fn user_state(best: &[bool], graph: &ProblemGraph, first_in: bool) -> Vec<i64> {
    let reference = if first_in { best[0] } else { true };
    let mut out: Vec<i64> = best
        .iter()
        .enumerate()
        .filter(|&(_, &up)| up == reference)
        .filter_map(|(i, _)| graph.user_label(i))
        .collect();
    out.sort_unstable();
    out
}
