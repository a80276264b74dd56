//! # quench-core: Path-Integral Monte-Carlo Simulated Quantum Annealing
//!
//! `quench-core` implements discrete-time path-integral Monte-Carlo
//! simulated quantum annealing (SQA) for classical Ising-like optimization
//! problems with arbitrary k-body interactions.
//!
//! ## Overview
//!
//! A problem is a set of weighted hyperedges over `N` binary spins. The
//! simulator:
//!
//! 1. **Replicates the system** across `NT` imaginary-time (Trotter) slices,
//!    one bit-packed line per spin
//! 2. **Anneals** temperature `T` and transverse field `Γ` along piecewise
//!    schedules while sweeping Wolff-style cluster updates along each
//!    Trotter column
//! 3. **Reports** the lowest-energy classical slice found, with per-arity
//!    energy statistics
//!
//! ## Architecture
//!
//! The hot path is a per-column cluster update driven by three ingredients:
//!
//! - **Bit-packed Trotter lines** — cluster boundaries fall out of a shifted
//!   xor plus a word-at-a-time Bernoulli bond-break draw
//! - **An incremental local-energy cache** — `E[i][t]` is maintained under
//!   every accepted flip, so acceptance tests are slice-range sums
//! - **A saturating fast exponential** — safe because edge weights are
//!   renormalized every update to bound the Metropolis exponent
//!
//! ## Quick Start
//!
//! ```
//! use quench_core::{ProblemGraph, RemapPolicy, RunConfig, SqaEngine};
//!
//! // Two-spin problem: a coupling and a field.
//! let graph = ProblemGraph::from_edges(
//!     2,
//!     vec![(-1.0, vec![0, 1]), (0.5, vec![0])],
//!     &RemapPolicy::default(),
//! )
//! .unwrap();
//!
//! let config = RunConfig {
//!     steps: 200,
//!     nt: 32,
//!     ..RunConfig::default()
//! };
//!
//! let mut engine = SqaEngine::new(graph, config).unwrap();
//! engine.run().unwrap();
//!
//! println!("energy {}", engine.energy().unwrap());
//! for (key, value) in engine.to_map() {
//!     println!("{key} {value}");
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`graph`] - Canonical hyperedge set, label remapping, text parsing,
//!   weight normalization
//! - [`line`] / [`state`] - Bit-packed Trotter lines and the full state
//! - [`schedule`] - Piecewise T and Γ schedules
//! - [`kernel`] - The cluster-update kernel, fast-exp, bitstream sampler
//! - [`analyze`] - Per-slice energies, best-slice extraction
//! - [`engine`] - The run lifecycle and result map
//! - [`rng`] - Master-seed splitting
//!
//! ## Reproducibility
//!
//! A run is fully determined by `{problem, nt, steps, seed, T, H, periodic,
//! remap, first_in}`: the master seed feeds a splittable sequence that seeds
//! every engine in a fixed order, spins are swept in ascending index order,
//! and clusters are decided in ascending slice order with the wrap-around
//! cluster last.

#![deny(missing_docs)]

pub mod analyze;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod kernel;
pub mod line;
pub mod rng;
pub mod schedule;
pub mod state;

pub use config::RunConfig;
pub use engine::{Phase, SqaEngine};
pub use error::{Error, Result};
pub use graph::normalize::NormalizedWeights;
pub use graph::parse::parse_problem_text;
pub use graph::remap::{FillMode, RemapPolicy, SortOrder};
pub use graph::{Hyperedge, ProblemGraph};
pub use kernel::SqaKernel;
pub use line::TrotterLine;
pub use schedule::{PiecewiseSchedule, SegmentKind};
pub use state::TrotterState;
