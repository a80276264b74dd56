//! Per-update weight normalization.
//!
//! The cluster kernel works with edge weights divided by
//! `W* = max_i Σ_{e∋i} |w_e|`, which bounds the Metropolis exponent and
//! keeps the fast-exp approximation inside its accuracy contract. The
//! analyzer keeps seeing the original weights.

use super::ProblemGraph;

/// The normalized weight vector, parallel to the canonical edge list.
#[derive(Debug, Clone, Default)]
pub struct NormalizedWeights {
    weights: Vec<f64>,
    site_abs: Vec<f64>,
    site_max: f64,
}

impl NormalizedWeights {
    /// Computes the normalization for `graph`.
    pub fn new(graph: &ProblemGraph) -> Self {
        let mut nw = Self {
            weights: vec![0.0; graph.n_edge()],
            site_abs: vec![0.0; graph.n_vert()],
            site_max: 0.0,
        };
        nw.recompute(graph);
        nw
    }

    /// Recomputes `W*` and the normalized weights in place. Called once per
    /// `update()`; reuses its buffers.
    pub fn recompute(&mut self, graph: &ProblemGraph) {
        self.site_abs.fill(0.0);
        for edge in graph.edges() {
            let abs = edge.weight.abs();
            for &v in &edge.verts {
                self.site_abs[v as usize] += abs;
            }
        }
        self.site_max = self.site_abs.iter().fold(0.0, |a: f64, &b| a.max(b));
        if self.site_max > 0.0 {
            for (w, edge) in self.weights.iter_mut().zip(graph.edges()) {
                *w = edge.weight / self.site_max;
            }
        }
    }

    /// Normalized weight of edge `e`.
    #[inline]
    pub fn weight(&self, e: usize) -> f64 {
        self.weights[e]
    }

    /// All normalized weights, parallel to the canonical edge list.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `W*`, zero only for an empty problem.
    #[inline]
    pub fn site_max(&self) -> f64 {
        self.site_max
    }
}
