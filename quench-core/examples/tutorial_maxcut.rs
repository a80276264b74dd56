//! Max-cut of a 5-cycle via simulated quantum annealing.
//!
//! Run with: `cargo run --release -p quench-core --example tutorial_maxcut`

use quench_core::{ProblemGraph, RemapPolicy, RunConfig, SqaEngine};

fn main() {
    // Antiferromagnetic ring: every edge wants its endpoints anti-aligned.
    // An odd cycle cannot satisfy all five, so the best cut has 4 edges.
    let ring: Vec<(f64, Vec<i64>)> = (0..5)
        .map(|i| (-1.0, vec![i, (i + 1) % 5]))
        .collect();

    let graph = ProblemGraph::from_edges(5, ring, &RemapPolicy::default())
        .expect("ring canonicalizes");

    let config = RunConfig {
        steps: 2000,
        nt: 64,
        seed: 42,
        ..RunConfig::default()
    };

    let mut engine = SqaEngine::new(graph, config).expect("config parses");
    engine.run().expect("run completes");

    let analysis = engine.analysis().expect("finished");
    println!("energy  {}", analysis.energy());
    println!("maxcut  {}", analysis.maxcut());
    println!("side    {:?}", engine.reported_state().expect("finished"));
    println!();
    for (key, value) in engine.to_map() {
        println!("{key} {value}");
    }
}
