//! Word-at-a-time Bernoulli sampling.
//!
//! Produces a `u64` whose bits are independently 1 with probability `p`.
//! The probability is expanded to 32 bits, Gray-coded, and stored as a
//! table of all-ones/all-zero masks; a sample AND-accumulates uniform words
//! and xors the masked accumulator into the output, stopping early once the
//! accumulator empties (two uniform draws on average).
//!
//! After L. Pierre, T. Giamarchi, H. J. Schulz, J. Stat. Phys. 48, 135
//! (1987).

use rand::Rng;

/// Bits of probability resolution.
const PRECISION: u32 = 32;

/// Per-bit Bernoulli(`p`) sampler over `u64` words.
#[derive(Debug, Clone)]
pub struct BitstreamSampler {
    p: f64,
    table: [u64; PRECISION as usize],
}

impl BitstreamSampler {
    /// Creates a sampler for probability `p`.
    ///
    /// # Panics
    /// Panics if `p` is not in `[0, 1]`.
    pub fn new(p: f64) -> Self {
        let mut sampler = Self {
            p: 0.0,
            table: [0; PRECISION as usize],
        };
        sampler.set_probability(p);
        sampler
    }

    /// Rebuilds the probability table for `p`. Called once per `update()`,
    /// when the bond-break probability changes.
    pub fn set_probability(&mut self, p: f64) {
        assert!((0.0..=1.0).contains(&p), "probability out of range: {p}");
        self.p = p;
        let probbits = (p * (1u64 << PRECISION) as f64) as u64;
        let gray = probbits ^ (probbits >> 1);
        for (i, mask) in self.table.iter_mut().enumerate() {
            *mask = if gray >> i & 1 != 0 { !0 } else { 0 };
        }
    }

    /// The current probability.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// Draws one word of 64 independent Bernoulli(`p`) bits.
    #[inline]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        let mut acc = !0u64;
        let mut word = self.table[PRECISION as usize - 1];
        for i in (0..PRECISION as usize - 1).rev() {
            acc &= rng.random::<u64>();
            if acc == 0 {
                break;
            }
            word ^= acc & self.table[i];
        }
        word
    }
}
