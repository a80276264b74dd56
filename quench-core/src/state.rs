//! The full Trotter state: one bit-packed line per spin.

use rand::Rng;

use crate::line::TrotterLine;

/// `N` Trotter lines of `NT` slices each.
#[derive(Debug, Clone)]
pub struct TrotterState {
    nt: usize,
    lines: Vec<TrotterLine>,
}

impl TrotterState {
    /// Creates an all-up state of `n_vert` spins over `nt` slices.
    pub fn new(n_vert: usize, nt: usize) -> Self {
        Self {
            nt,
            lines: vec![TrotterLine::new(nt); n_vert],
        }
    }

    /// Number of spins.
    #[inline]
    pub fn n_vert(&self) -> usize {
        self.lines.len()
    }

    /// Number of Trotter slices.
    #[inline]
    pub fn nt(&self) -> usize {
        self.nt
    }

    /// The line of spin `i`.
    #[inline]
    pub fn line(&self, i: usize) -> &TrotterLine {
        &self.lines[i]
    }

    /// Mutable access to the line of spin `i`.
    #[inline]
    pub fn line_mut(&mut self, i: usize) -> &mut TrotterLine {
        &mut self.lines[i]
    }

    /// All lines.
    #[inline]
    pub fn lines(&self) -> &[TrotterLine] {
        &self.lines
    }

    /// Randomizes every line from `rng`, one word draw per block.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for line in &mut self.lines {
            line.fill_random(rng);
        }
    }
}
