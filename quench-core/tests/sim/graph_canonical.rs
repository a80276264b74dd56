//! Canonicalization and ingestion edge cases beyond the unit tests.

use quench_core::{parse_problem_text, Error, ProblemGraph, RemapPolicy, RunConfig, SqaEngine};

#[test]
fn encounter_fill_numbers_unseen_labels_after_seen_ones() {
    let policy: RemapPolicy = "encounter,fill,0".parse().unwrap();
    let g = ProblemGraph::from_edges(4, vec![(1.0, vec![3, 1])], &policy).unwrap();
    // first-seen: 3 → 0, 1 → 1; filled: 0 → 2, 2 → 3
    assert_eq!(g.user_label(0), Some(3));
    assert_eq!(g.user_label(1), Some(1));
    assert_eq!(g.user_label(2), Some(0));
    assert_eq!(g.user_label(3), Some(2));
}

#[test]
fn fill_start_shifts_the_label_window() {
    let policy: RemapPolicy = "sorted,fill,10".parse().unwrap();
    let g = ProblemGraph::from_edges(3, vec![(1.0, vec![11, 12])], &policy).unwrap();
    let labels: Vec<_> = (0..3).map(|i| g.user_label(i).unwrap()).collect();
    assert_eq!(labels, vec![10, 11, 12]);

    let err = ProblemGraph::from_edges(3, vec![(1.0, vec![14, 11])], &policy).unwrap_err();
    assert!(matches!(err, Error::InconsistentLabels { .. }));
}

#[test]
fn no_fill_leaves_uncoupled_spins_unlabeled() {
    let policy: RemapPolicy = "sorted,no_fill".parse().unwrap();
    let g = ProblemGraph::from_edges(3, vec![(-1.0, vec![4, 8])], &policy).unwrap();
    assert_eq!(g.user_label(0), Some(4));
    assert_eq!(g.user_label(1), Some(8));
    assert_eq!(g.user_label(2), None);
}

#[test]
fn unlabeled_spins_never_reach_the_reported_state() {
    let policy: RemapPolicy = "sorted,no_fill".parse().unwrap();
    let g = ProblemGraph::from_edges(3, vec![(-1.0, vec![4, 8])], &policy).unwrap();
    let config = RunConfig {
        steps: 50,
        nt: 16,
        remap: "sorted,no_fill".to_string(),
        ..RunConfig::default()
    };
    let mut eng = SqaEngine::new(g, config).unwrap();
    eng.run().unwrap();
    for label in eng.reported_state().unwrap() {
        assert!([4, 8].contains(label));
    }
}

#[test]
fn negative_labels_are_ordinary_labels() {
    let policy: RemapPolicy = "sorted,no_fill".parse().unwrap();
    let g = ProblemGraph::from_edges(2, vec![(1.0, vec![-5, 5])], &policy).unwrap();
    assert_eq!(g.user_label(0), Some(-5));
    assert_eq!(g.user_label(1), Some(5));
}

#[test]
fn merge_is_performed_on_canonical_vertex_order() {
    // [1,0] and [0,1] are the same edge after intra-edge sorting.
    let g = ProblemGraph::from_edges(
        2,
        vec![(1.0, vec![1, 0]), (2.0, vec![0, 1])],
        &RemapPolicy::default(),
    )
    .unwrap();
    assert_eq!(g.n_edge(), 1);
    assert_eq!(g.edges()[0].weight, 3.0);
}

#[test]
fn text_problem_with_crlf_and_comments() {
    let text = "# 2 1\r\n# weights below\r\n0 1 0.5\r\n";
    let g = parse_problem_text(text, &RemapPolicy::default()).unwrap();
    assert_eq!(g.n_edge(), 1);
    assert_eq!(g.edges()[0].weight, 0.5);
}

#[test]
fn header_must_lead_the_file() {
    let err = parse_problem_text("\n\n0 1 1.0\n", &RemapPolicy::default()).unwrap_err();
    assert!(matches!(err, Error::HeaderMalformed { .. }));
}
