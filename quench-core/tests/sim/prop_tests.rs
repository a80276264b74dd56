//! Property-based tests for the bit-level primitives and the schedule
//! grammar.

use proptest::prelude::*;

use quench_core::{PiecewiseSchedule, TrotterLine};

/// Builds a line from a plain bool vector.
fn line_from(bits: &[bool]) -> TrotterLine {
    let mut line = TrotterLine::new(bits.len());
    for (t, &b) in bits.iter().enumerate() {
        if b {
            line.set(t, true);
        }
    }
    line
}

proptest! {
    // =========================================================================
    // line.rs properties
    // =========================================================================

    #[test]
    fn prop_set_bits_matches_naive(bits in prop::collection::vec(any::<bool>(), 1..300)) {
        let line = line_from(&bits);
        let got: Vec<usize> = line.set_bits().collect();
        let want: Vec<usize> = bits
            .iter()
            .enumerate()
            .filter_map(|(t, &b)| b.then_some(t))
            .collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_shl_matches_naive(
        bits in prop::collection::vec(any::<bool>(), 1..300),
        k in 0usize..320,
    ) {
        let mut line = line_from(&bits);
        line.shl_assign(k);
        let nt = bits.len();
        let mut want = vec![false; nt];
        for t in 0..nt {
            if t >= k && bits[t - k] {
                want[t] = true;
            }
        }
        prop_assert_eq!(line, line_from(&want));
    }

    #[test]
    fn prop_flip_range_matches_naive(
        bits in prop::collection::vec(any::<bool>(), 1..300),
        bounds in (0usize..300, 0usize..300),
    ) {
        let nt = bits.len();
        let from = bounds.0.min(nt);
        let to = bounds.1.min(nt);
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let mut line = line_from(&bits);
        line.flip_range(from, to);
        let mut want = bits.clone();
        for b in &mut want[from..to] {
            *b = !*b;
        }
        prop_assert_eq!(line, line_from(&want));
    }

    #[test]
    fn prop_bitwise_ops_match_naive(
        a in prop::collection::vec(any::<bool>(), 1..200),
        seed_b in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let nt = a.len();
        let b: Vec<bool> = (0..nt).map(|i| seed_b[i % seed_b.len()]).collect();

        let mut xor = line_from(&a);
        xor.xor_assign(&line_from(&b));
        let want_xor: Vec<bool> = (0..nt).map(|i| a[i] ^ b[i]).collect();
        prop_assert_eq!(xor, line_from(&want_xor));

        let mut or = line_from(&a);
        or.or_assign(&line_from(&b));
        let want_or: Vec<bool> = (0..nt).map(|i| a[i] | b[i]).collect();
        prop_assert_eq!(or, line_from(&want_or));

        let mut and = line_from(&a);
        and.and_assign(&line_from(&b));
        let want_and: Vec<bool> = (0..nt).map(|i| a[i] & b[i]).collect();
        prop_assert_eq!(and, line_from(&want_and));
    }

    #[test]
    fn prop_flip_all_is_involutive(bits in prop::collection::vec(any::<bool>(), 1..200)) {
        let mut line = line_from(&bits);
        line.flip_all();
        prop_assert_eq!(line.count_ones(), bits.iter().filter(|&&b| !b).count());
        line.flip_all();
        prop_assert_eq!(line, line_from(&bits));
    }

    // =========================================================================
    // schedule.rs properties
    // =========================================================================

    #[test]
    fn prop_schedule_hits_endpoints_exactly(
        anchors in prop::collection::vec(0.1f64..10.0, 2..6),
        tags in prop::collection::vec(prop::sample::select(vec!["l", "iF", "iS", "sF", "sS"]), 5),
        steps in 2u64..5000,
    ) {
        let mut body = String::new();
        for (i, a) in anchors.iter().enumerate() {
            if i > 0 {
                body.push_str(&format!(",{},", tags[i - 1]));
            }
            body.push_str(&format!("{a}"));
        }
        let sched = PiecewiseSchedule::parse(&format!("[{body}]"), steps).unwrap();
        prop_assert_eq!(sched.value_at(0), anchors[0]);
        prop_assert_eq!(sched.value_at(steps - 1), *anchors.last().unwrap());
    }

    #[test]
    fn prop_schedule_stays_in_anchor_range_when_linear(
        a in 0.01f64..100.0,
        b in 0.01f64..100.0,
        steps in 2u64..1000,
        c in 0u64..1000,
    ) {
        let sched = PiecewiseSchedule::parse(&format!("[{a},{b}]"), steps).unwrap();
        let v = sched.value_at(c.min(steps - 1));
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
    }
}
