//! The SQA cluster-update kernel.
//!
//! One [`step`](SqaKernel::step) sweeps every spin in ascending index order.
//! For each spin the Trotter column is cut into clusters at the positions
//! where adjacent slices differ or where a random bond break was drawn, each
//! cluster's flip is accepted or rejected by Metropolis against the cached
//! per-slice local energies, and accepted flips are committed by updating
//! the neighbors' cache entries incrementally. Per-step cost is therefore
//! independent of how often the cache would otherwise have to be rebuilt.
//!
//! The kernel sees only normalized weights; `update()` re-derives the
//! imaginary-time discretization `τ = 1/(T·NT)`, sets the Metropolis
//! exponent coefficient to `2τ` (the cache stores half-energies), and sets
//! the bond-break probability `tanh(τ·|Γ|)`.

pub mod bitstream;
pub mod fastexp;

use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::graph::normalize::NormalizedWeights;
use crate::graph::ProblemGraph;
use crate::line::TrotterLine;
use crate::rng::SeedSequence;
use crate::state::TrotterState;
use bitstream::BitstreamSampler;
use fastexp::FastExp;

/// Sign convention for one interaction's energy contribution.
///
/// `anti_aligned` is true when the product of the participating spin signs
/// is −1; the contribution is then `+weight`, otherwise `−weight`.
#[inline]
pub fn energy_contribution(anti_aligned: bool, weight: f64) -> f64 {
    if anti_aligned {
        weight
    } else {
        -weight
    }
}

/// The cluster-update kernel: state, local-energy cache, scratch lines, and
/// the random engines. All buffers are sized once at construction; `step()`
/// performs no heap allocation.
pub struct SqaKernel {
    nt: usize,
    periodic: bool,
    state: TrotterState,
    /// Per-spin edge indices, with each spin's field edge removed.
    adjacency: Vec<Vec<u32>>,
    /// The arity-1 edge backing each spin's field term, if any.
    field_edge: Vec<Option<u32>>,
    /// Local energies, row stride `nt`: `energy[i*nt + t]` is spin `i`'s
    /// contribution at slice `t` (field term plus couplings, half-energy
    /// convention).
    energy: Vec<f64>,

    // Scratch lines reused across spins.
    bond_mask: TrotterLine,
    orientation: TrotterLine,
    updates: TrotterLine,
    alignment: TrotterLine,

    // Engines, seeded from the master sequence in a fixed order.
    metropolis: Xoshiro256PlusPlus,
    words: Xoshiro256PlusPlus,

    fexp: FastExp,
    bond_break: BitstreamSampler,
}

impl SqaKernel {
    /// Builds the kernel: randomizes the state, extracts field edges from
    /// the adjacency, and seeds the local-energy cache from the current
    /// normalized weights.
    pub fn new(
        graph: &ProblemGraph,
        weights: &NormalizedWeights,
        nt: usize,
        periodic: bool,
        seeds: &mut SeedSequence,
    ) -> Self {
        let n_vert = graph.n_vert();

        let mut fill = seeds.spawn();
        let metropolis = seeds.spawn();
        let words = seeds.spawn();

        let mut state = TrotterState::new(n_vert, nt);
        state.randomize(&mut fill);

        // Pull each spin's local field out of its edge list; the cache
        // carries it from here on.
        let mut adjacency = graph.adjacency();
        let mut field_edge = vec![None; n_vert];
        for (i, edges) in adjacency.iter_mut().enumerate() {
            if let Some(pos) = edges
                .iter()
                .position(|&ei| graph.edges()[ei as usize].arity() == 1)
            {
                field_edge[i] = Some(edges.remove(pos));
            }
        }

        let mut kernel = Self {
            nt,
            periodic,
            state,
            adjacency,
            field_edge,
            energy: vec![0.0; n_vert * nt],
            bond_mask: TrotterLine::new(nt),
            orientation: TrotterLine::new(nt),
            updates: TrotterLine::new(nt),
            alignment: TrotterLine::new(nt),
            metropolis,
            words,
            fexp: FastExp::new(),
            bond_break: BitstreamSampler::new(0.0),
        };
        kernel.seed_energy(graph, weights);
        kernel
    }

    /// Populates the local-energy cache from scratch.
    fn seed_energy(&mut self, graph: &ProblemGraph, weights: &NormalizedWeights) {
        let nt = self.nt;
        let Self {
            ref mut energy,
            ref mut alignment,
            ref state,
            ref adjacency,
            ref field_edge,
            ..
        } = *self;

        for i in 0..state.n_vert() {
            let h = field_edge[i].map_or(0.0, |ei| weights.weight(ei as usize));
            let line = state.line(i);
            let row = &mut energy[i * nt..(i + 1) * nt];
            for (t, e) in row.iter_mut().enumerate() {
                *e = energy_contribution(line.get(t), h);
            }
            for &ei in &adjacency[i] {
                let edge = &graph.edges()[ei as usize];
                let w = weights.weight(ei as usize);
                alignment.clear();
                for &j in &edge.verts {
                    alignment.xor_assign(state.line(j as usize));
                }
                for (t, e) in row.iter_mut().enumerate() {
                    *e += energy_contribution(alignment.get(t), w);
                }
            }
        }
    }

    /// Re-derives the per-step constants from the scheduled temperature and
    /// transverse field. The bond-break probability table is rebuilt only
    /// when the probability actually changed.
    pub fn update(&mut self, temperature: f64, field: f64) {
        let tau = 1.0 / (temperature * self.nt as f64);
        self.fexp.set_coefficient(2.0 * tau);
        let p = (tau * field.abs()).tanh();
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        if p != self.bond_break.probability() {
            self.bond_break.set_probability(p);
        }
    }

    /// One annealing step: cluster updates over every spin, ascending.
    pub fn step(&mut self, graph: &ProblemGraph, weights: &NormalizedWeights) {
        let nt = self.nt;
        for i in 0..self.state.n_vert() {
            self.form_bonds(i);

            {
                let Self {
                    ref energy,
                    ref bond_mask,
                    ref mut updates,
                    ref mut metropolis,
                    ref fexp,
                    ..
                } = *self;
                let row = &energy[i * nt..(i + 1) * nt];

                let mut breaks = bond_mask.set_bits();
                let first = breaks.next().unwrap_or(nt);
                let mut last = first;
                for b in breaks {
                    let delta: f64 = row[last..b].iter().sum();
                    if metropolis.random::<f64>() <= fexp.eval(delta) {
                        updates.flip_range(last, b);
                    }
                    last = b;
                }
                // The wrap-around cluster closes the column: its tail runs
                // from the last break to NT and continues at slice 0 up to
                // the first break. With no break at all it is the whole
                // column.
                let delta: f64 =
                    row[..first].iter().sum::<f64>() + row[last..].iter().sum::<f64>();
                if metropolis.random::<f64>() <= fexp.eval(delta) {
                    updates.flip_range(last, nt);
                    updates.flip_range(0, first);
                }
            }

            if self.updates.any() {
                self.commit(i, graph, weights);
            }
            self.updates.clear();
        }
    }

    /// Draws the bond-break mask for column `i` and ors in the relative
    /// orientation of adjacent slices. The set bits of the result are the
    /// break points of the cluster decomposition.
    fn form_bonds(&mut self, i: usize) {
        let nt = self.nt;
        let periodic = self.periodic;
        let Self {
            ref mut bond_mask,
            ref mut orientation,
            ref mut words,
            ref bond_break,
            ref state,
            ..
        } = *self;
        let line = state.line(i);

        for w in 0..line.words().len() {
            bond_mask.set_word(w, bond_break.sample(words));
        }

        orientation.copy_from(line);
        orientation.shl_assign(1);
        if periodic {
            orientation.set(0, line.get(nt - 1));
            orientation.xor_assign(line);
        } else {
            orientation.xor_assign(line);
            // open boundary: slice 0 always starts a cluster
            orientation.set(0, true);
        }
        bond_mask.or_assign(orientation);
    }

    /// Applies the accepted flips of column `i`: neighbors' cache entries
    /// move by `∓2w'` per flipped slice (judged against the pre-flip
    /// alignment), the line is xored, and the flipped slices' own
    /// contributions change sign.
    fn commit(&mut self, i: usize, graph: &ProblemGraph, weights: &NormalizedWeights) {
        let nt = self.nt;
        {
            let Self {
                ref mut energy,
                ref mut alignment,
                ref updates,
                ref state,
                ref adjacency,
                ..
            } = *self;
            for &ei in &adjacency[i] {
                let edge = &graph.edges()[ei as usize];
                let w2 = 2.0 * weights.weight(ei as usize);
                alignment.clear();
                for &j in &edge.verts {
                    alignment.xor_assign(state.line(j as usize));
                }
                for &j in &edge.verts {
                    let j = j as usize;
                    if j == i {
                        continue;
                    }
                    let row = &mut energy[j * nt..(j + 1) * nt];
                    for t in updates.set_bits() {
                        row[t] -= energy_contribution(alignment.get(t), w2);
                    }
                }
            }
        }
        {
            let Self {
                ref mut state,
                ref updates,
                ..
            } = *self;
            state.line_mut(i).xor_assign(updates);
        }
        let Self {
            ref mut energy,
            ref updates,
            ..
        } = *self;
        let row = &mut energy[i * nt..(i + 1) * nt];
        for t in updates.set_bits() {
            row[t] = -row[t];
        }
    }

    /// The current Trotter state.
    #[inline]
    pub fn state(&self) -> &TrotterState {
        &self.state
    }

    /// Spin `i`'s cached local energies over all slices.
    #[inline]
    pub fn local_energy(&self, i: usize) -> &[f64] {
        &self.energy[i * self.nt..(i + 1) * self.nt]
    }

    /// The kernel's adjacency (field edges removed).
    #[inline]
    pub fn adjacency(&self) -> &[Vec<u32>] {
        &self.adjacency
    }

    /// The arity-1 edge backing spin `i`'s field term, if any.
    #[inline]
    pub fn field_edge(&self, i: usize) -> Option<u32> {
        self.field_edge[i]
    }
}
