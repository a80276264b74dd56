//! Shared helpers for the integration suite.

#![allow(dead_code)] // Not all test files use all helpers

use quench_core::kernel::energy_contribution;
use quench_core::{ProblemGraph, RemapPolicy, RunConfig, SqaEngine};

/// Builds an engine over `(weight, labels)` pairs with the default remap.
pub fn engine(edges: Vec<(f64, Vec<i64>)>, n: usize, config: RunConfig) -> SqaEngine {
    let graph = ProblemGraph::from_edges(n, edges, &RemapPolicy::default())
        .expect("test problem must canonicalize");
    SqaEngine::new(graph, config).expect("test config must parse")
}

/// Builds and fully runs an engine.
pub fn run(edges: Vec<(f64, Vec<i64>)>, n: usize, config: RunConfig) -> SqaEngine {
    let mut e = engine(edges, n, config);
    e.run().expect("run must complete");
    e
}

/// A short default configuration for cheap tests.
pub fn quick_config(steps: u64, nt: usize) -> RunConfig {
    RunConfig {
        steps,
        nt,
        ..RunConfig::default()
    }
}

/// Recomputes spin `i`'s local energy at slice `t` from scratch, from the
/// current state and normalized weights. The cache must match this after
/// every `step()`/`update()` boundary.
pub fn recompute_local_energy(eng: &SqaEngine, i: usize, t: usize) -> f64 {
    let kernel = eng.kernel().expect("engine must be initialized");
    let weights = eng.weights();
    let h = kernel
        .field_edge(i)
        .map_or(0.0, |ei| weights.weight(ei as usize));
    let mut e = energy_contribution(kernel.state().line(i).get(t), h);
    for &ei in &kernel.adjacency()[i] {
        let edge = &eng.graph().edges()[ei as usize];
        let mut anti = false;
        for &j in &edge.verts {
            anti ^= kernel.state().line(j as usize).get(t);
        }
        e += energy_contribution(anti, weights.weight(ei as usize));
    }
    e
}

/// Asserts cache/state consistency for every `(i, t)`.
pub fn assert_cache_consistent(eng: &SqaEngine, context: &str) {
    let kernel = eng.kernel().expect("engine must be initialized");
    let n = eng.graph().n_vert();
    let nt = kernel.state().nt();
    for i in 0..n {
        let row = kernel.local_energy(i);
        for t in 0..nt {
            let want = recompute_local_energy(eng, i, t);
            assert!(
                (row[t] - want).abs() < 1e-8,
                "{context}: cache drift at spin {i} slice {t}: \
                 cached {} recomputed {want}",
                row[t]
            );
        }
    }
}
