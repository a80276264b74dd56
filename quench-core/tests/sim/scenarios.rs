//! End-to-end annealing scenarios.

use crate::common;

use quench_core::{parse_problem_text, RemapPolicy, RunConfig, SqaEngine};

fn default_run(edges: Vec<(f64, Vec<i64>)>, n: usize) -> SqaEngine {
    common::run(edges, n, RunConfig::default())
}

#[test]
fn single_spin_with_positive_field() {
    // A +1 field edge favors spin up; the best slice reaches energy −1 and
    // the up spin is reported.
    let eng = default_run(vec![(1.0, vec![0])], 1);
    assert_eq!(eng.energy().unwrap(), -1.0);
    assert_eq!(eng.reported_state().unwrap(), &[0]);
    let analysis = eng.analysis().unwrap();
    assert_eq!(analysis.best_histogram()[&1], -1.0);
}

#[test]
fn negative_pair_coupling_anti_aligns() {
    // A −1 pair coupling prefers a spin product of −1: energy −1 with the
    // two spins anti-aligned, so exactly one label is in the reference
    // orientation.
    let eng = default_run(vec![(-1.0, vec![0, 1])], 2);
    assert_eq!(eng.energy().unwrap(), -1.0);
    assert_eq!(eng.reported_state().unwrap().len(), 1);
}

#[test]
fn negative_pair_coupling_first_in_reports_first_spin() {
    let config = RunConfig {
        first_in: true,
        ..RunConfig::default()
    };
    let eng = common::run(vec![(-1.0, vec![0, 1])], 2, config);
    assert_eq!(eng.energy().unwrap(), -1.0);
    // first_in pins the reference to spin 0; anti-aligned leaves it alone
    assert_eq!(eng.reported_state().unwrap(), &[0]);
}

#[test]
fn three_body_with_fields() {
    let eng = default_run(
        vec![(1.0, vec![0, 1, 2]), (-1.0, vec![0]), (-1.0, vec![1])],
        3,
    );
    assert_eq!(eng.energy().unwrap(), -3.0);
    // −3 is attained only by (down, down, up)
    assert_eq!(eng.reported_state().unwrap(), &[2]);
}

#[test]
fn empty_problem_runs_at_zero_energy() {
    let eng = default_run(vec![], 4);
    assert_eq!(eng.energy().unwrap(), 0.0);
    let analysis = eng.analysis().unwrap();
    assert_eq!(analysis.degen, 100);
    assert_eq!(analysis.min_index, 0);
    assert_eq!(analysis.maxcut(), 0.0);
}

#[test]
fn maxcut_of_a_frustrated_triangle() {
    // Negative pair weights want anti-alignment; a triangle frustrates one
    // edge: energy −1 −1 +1 = −1, maxcut (−3 + (−1))/−2 = 2.
    let eng = default_run(
        vec![(-1.0, vec![0, 1]), (-1.0, vec![1, 2]), (-1.0, vec![0, 2])],
        3,
    );
    assert_eq!(eng.energy().unwrap(), -1.0);
    assert_eq!(eng.analysis().unwrap().maxcut(), 2.0);
}

#[test]
fn equal_keys_reproduce_bit_identically() {
    let edges = vec![
        (1.0, vec![0, 1]),
        (-0.7, vec![1, 2, 3]),
        (0.5, vec![2]),
        (1.2, vec![0, 3]),
    ];
    let config = RunConfig {
        steps: 300,
        nt: 64,
        seed: 99,
        ..RunConfig::default()
    };
    let a = common::run(edges.clone(), 4, config.clone());
    let b = common::run(edges, 4, config);

    let mut ma = a.to_map();
    let mut mb = b.to_map();
    for m in [&mut ma, &mut mb] {
        m.remove("runtime_sec");
        m.remove("runtime_cycles");
    }
    assert_eq!(ma, mb);
}

#[test]
fn text_and_programmatic_ingestion_agree() {
    let text = "# 3 3\n0 1 1.0\n1 2 -0.5\n2 0.25\n";
    let graph_a = parse_problem_text(text, &RemapPolicy::default()).unwrap();
    let config = RunConfig {
        steps: 100,
        nt: 32,
        ..RunConfig::default()
    };
    let mut from_text = SqaEngine::new(graph_a, config.clone()).unwrap();
    from_text.run().unwrap();

    let from_pairs = common::run(
        vec![(1.0, vec![0, 1]), (-0.5, vec![1, 2]), (0.25, vec![2])],
        3,
        config,
    );

    let mut ma = from_text.to_map();
    let mut mb = from_pairs.to_map();
    for m in [&mut ma, &mut mb] {
        m.remove("runtime_sec");
        m.remove("runtime_cycles");
    }
    assert_eq!(ma, mb);
}

#[test]
fn open_boundary_run_reaches_the_same_ground_state() {
    let config = RunConfig {
        periodic: false,
        ..RunConfig::default()
    };
    let eng = common::run(vec![(1.0, vec![0]), (-1.0, vec![0, 1])], 2, config);
    // field pins spin 0 up (−1), the −1 coupling anti-aligns spin 1 (−1)
    assert_eq!(eng.energy().unwrap(), -2.0);
}
