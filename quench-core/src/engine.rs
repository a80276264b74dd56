//! The annealing driver.
//!
//! [`SqaEngine`] owns every component of a run — problem graph, schedules,
//! normalizer, kernel, analysis — and drives the lifecycle
//!
//! ```text
//! init → update → while !stop { step; advance; update } → finish
//! ```
//!
//! The lifecycle is a state machine `Uninitialized → Ready → Running ↔
//! Stopped → Finalized`; calls out of order return
//! [`Error::BoundaryViolation`]. Results are read after `finish()`, either
//! through typed accessors or flattened into a string map.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crate::analyze::{analyze_slices, best_slice_state, user_state, SliceEnergies};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::graph::normalize::NormalizedWeights;
use crate::graph::ProblemGraph;
use crate::kernel::SqaKernel;
use crate::rng::SeedSequence;
use crate::schedule::PiecewiseSchedule;

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet initialized.
    Uninitialized,
    /// `init()` has seeded state and cache.
    Ready,
    /// At least one `update()` has run.
    Running,
    /// The step budget is exhausted.
    Stopped,
    /// `finish()` has produced the reported results.
    Finalized,
}

/// The single-threaded annealing driver.
pub struct SqaEngine {
    config: RunConfig,
    graph: ProblemGraph,
    weights: NormalizedWeights,
    t_sched: PiecewiseSchedule,
    h_sched: PiecewiseSchedule,
    kernel: Option<SqaKernel>,
    counter: u64,
    phase: Phase,
    started: Option<Instant>,
    elapsed: Option<Duration>,
    analysis: Option<SliceEnergies>,
    reported: Option<Vec<i64>>,
}

impl SqaEngine {
    /// Builds the engine over an already-canonicalized graph.
    ///
    /// # Errors
    /// [`Error::ScheduleMalformed`] if either schedule string does not
    /// parse.
    pub fn new(graph: ProblemGraph, config: RunConfig) -> Result<Self> {
        let t_sched = PiecewiseSchedule::parse(&config.t_schedule, config.steps)?;
        let h_sched = PiecewiseSchedule::parse(&config.h_schedule, config.steps)?;
        let weights = NormalizedWeights::new(&graph);
        Ok(Self {
            config,
            graph,
            weights,
            t_sched,
            h_sched,
            kernel: None,
            counter: 0,
            phase: Phase::Uninitialized,
            started: None,
            elapsed: None,
            analysis: None,
            reported: None,
        })
    }

    /// Seeds the Trotter state and the local-energy cache.
    pub fn init(&mut self) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(Error::BoundaryViolation("init() called twice"));
        }
        self.started = Some(Instant::now());
        self.weights.recompute(&self.graph);
        let mut seeds = SeedSequence::new(self.config.seed);
        self.kernel = Some(SqaKernel::new(
            &self.graph,
            &self.weights,
            self.config.nt,
            self.config.periodic,
            &mut seeds,
        ));
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Renormalizes the weights and pushes the scheduled temperature and
    /// transverse field into the kernel.
    pub fn update(&mut self) -> Result<()> {
        match self.phase {
            Phase::Ready => self.phase = Phase::Running,
            Phase::Running => {}
            _ => return Err(Error::BoundaryViolation("update() outside the run loop")),
        }
        self.weights.recompute(&self.graph);
        let temperature = self.t_sched.value_at(self.counter);
        let field = self.h_sched.value_at(self.counter);
        let Some(kernel) = self.kernel.as_mut() else {
            return Err(Error::BoundaryViolation("update() before init()"));
        };
        kernel.update(temperature, field);
        Ok(())
    }

    /// One cluster-update sweep over all spins.
    pub fn step(&mut self) -> Result<()> {
        if self.phase != Phase::Running {
            return Err(Error::BoundaryViolation("step() before init()/update()"));
        }
        let Some(kernel) = self.kernel.as_mut() else {
            return Err(Error::BoundaryViolation("step() before init()"));
        };
        kernel.step(&self.graph, &self.weights);
        Ok(())
    }

    /// Advances the step counter. Takes no observable: no feedback
    /// scheduler is configured.
    pub fn advance(&mut self) {
        self.counter += 1;
    }

    /// True once the step budget is exhausted.
    pub fn stop(&self) -> bool {
        self.counter >= self.config.steps
    }

    /// Analyzes all slices, selects the best one, and freezes the results.
    pub fn finish(&mut self) -> Result<()> {
        match self.phase {
            Phase::Running | Phase::Stopped => {}
            _ => return Err(Error::BoundaryViolation("finish() before the run loop")),
        }
        if self.config.steps > 0 && !self.stop() {
            return Err(Error::BoundaryViolation("finish() before stop()"));
        }
        let Some(kernel) = self.kernel.as_ref() else {
            return Err(Error::BoundaryViolation("finish() before init()"));
        };
        let analysis = analyze_slices(kernel.state(), &self.graph);
        let best = best_slice_state(kernel.state(), analysis.min_index);
        self.reported = Some(user_state(&best, &self.graph, self.config.first_in));
        self.analysis = Some(analysis);
        self.elapsed = self.started.map(|t| t.elapsed());
        self.phase = Phase::Finalized;
        Ok(())
    }

    /// Runs the whole lifecycle.
    ///
    /// # Errors
    /// [`Error::BoundaryViolation`] if the step budget is already exhausted
    /// before the first `update()` (a zero-step run), plus anything the
    /// individual transitions can return.
    pub fn run(&mut self) -> Result<()> {
        self.init()?;
        if self.stop() {
            return Err(Error::BoundaryViolation(
                "stop() already true before the first update()",
            ));
        }
        self.update()?;
        while !self.stop() {
            self.step()?;
            self.advance();
            self.update()?;
        }
        self.phase = Phase::Stopped;
        self.finish()
    }

    /// The current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The configuration this engine runs with.
    #[inline]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The canonical problem graph.
    #[inline]
    pub fn graph(&self) -> &ProblemGraph {
        &self.graph
    }

    /// The current normalized weights.
    #[inline]
    pub fn weights(&self) -> &NormalizedWeights {
        &self.weights
    }

    /// The kernel, once `init()` has run.
    #[inline]
    pub fn kernel(&self) -> Option<&SqaKernel> {
        self.kernel.as_ref()
    }

    /// The per-slice analysis, once `finish()` has run.
    #[inline]
    pub fn analysis(&self) -> Option<&SliceEnergies> {
        self.analysis.as_ref()
    }

    /// The sorted user-labeled state, once `finish()` has run.
    #[inline]
    pub fn reported_state(&self) -> Option<&[i64]> {
        self.reported.as_deref()
    }

    /// The best slice's classical energy, once `finish()` has run.
    pub fn energy(&self) -> Option<f64> {
        self.analysis.as_ref().map(SliceEnergies::energy)
    }

    /// Flattens configuration, timing, and results into a string map.
    /// Result keys appear only after `finish()`.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut m = BTreeMap::new();
        m.insert("seed".to_string(), self.config.seed.to_string());
        m.insert("steps".to_string(), self.config.steps.to_string());
        m.insert("nt".to_string(), self.config.nt.to_string());
        m.insert("T".to_string(), self.config.t_schedule.clone());
        m.insert("H".to_string(), self.config.h_schedule.clone());
        m.insert("remap".to_string(), self.config.remap.clone());
        m.insert(
            "periodic".to_string(),
            u8::from(self.config.periodic).to_string(),
        );
        m.insert(
            "first_in".to_string(),
            u8::from(self.config.first_in).to_string(),
        );

        if let Some(analysis) = &self.analysis {
            m.insert("energy".to_string(), analysis.energy().to_string());
            m.insert("maxcut".to_string(), analysis.maxcut().to_string());
            m.insert(
                "energy_distr".to_string(),
                format_histogram(analysis.best_histogram()),
            );
            m.insert(
                "trotter_min_index".to_string(),
                analysis.min_index.to_string(),
            );
            m.insert("trotter_degen".to_string(), analysis.degen.to_string());
        }
        if let Some(state) = &self.reported {
            m.insert("state".to_string(), format_state(state));
        }
        if let Some(elapsed) = self.elapsed {
            m.insert("runtime_sec".to_string(), elapsed.as_secs_f64().to_string());
            m.insert("runtime_cycles".to_string(), elapsed.as_nanos().to_string());
        }
        m
    }
}

/// `{arity:value,…}`, ascending arity, arity 0 first as the total.
fn format_histogram(hist: &BTreeMap<usize, f64>) -> String {
    let mut out = String::from("{");
    for (i, (arity, value)) in hist.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{arity}:{value}");
    }
    out.push('}');
    out
}

/// `[l1,l2,…]`.
fn format_state(state: &[i64]) -> String {
    let mut out = String::from("[");
    for (i, label) in state.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{label}");
    }
    out.push(']');
    out
}
