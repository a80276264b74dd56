//! Annealing schedules.
//!
//! A schedule maps the step counter `c ∈ [0, steps)` to a real value (a
//! temperature or a transverse field) through a piecewise curve. The curve
//! is given as anchor values interleaved with optional per-segment method
//! tags, e.g. `"[10,iF,0.01]"` or `"[1,0.5,l,0.1]"`. Anchors sit at equally
//! spaced steps over `[0, steps−1]`; an untagged segment is linear.

use crate::error::{Error, Result};

/// Interpolation method for one schedule segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `l` — straight line between the anchors.
    Linear,
    /// `iF` — inverse curve, fast initial change.
    InverseFast,
    /// `iS` — inverse curve, slow initial change.
    InverseSlow,
    /// `sF` — square curve, fast initial change.
    SquareFast,
    /// `sS` — square curve, slow initial change.
    SquareSlow,
}

impl SegmentKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "l" => Some(Self::Linear),
            "iF" => Some(Self::InverseFast),
            "iS" => Some(Self::InverseSlow),
            "sF" => Some(Self::SquareFast),
            "sS" => Some(Self::SquareSlow),
            _ => None,
        }
    }

    /// Evaluates the segment between anchors `a` and `b` at progress
    /// `p ∈ [0, 1]`.
    fn eval(self, a: f64, b: f64, p: f64) -> f64 {
        match self {
            Self::Linear => a + (b - a) * p,
            Self::InverseSlow => {
                if a < b {
                    a * b / (b + (a - b) * p)
                } else {
                    a + b - a * b / (a - (a - b) * p)
                }
            }
            Self::InverseFast => {
                if a > b {
                    a * b / (b + (a - b) * p)
                } else {
                    a + b - a * b / (a - (a - b) * p)
                }
            }
            Self::SquareSlow => a + (b - a) * p * p,
            Self::SquareFast => b + (a - b) * (p - 1.0) * (p - 1.0),
        }
    }
}

/// A piecewise schedule over `[0, steps−1]`.
#[derive(Debug, Clone)]
pub struct PiecewiseSchedule {
    anchors: Vec<f64>,
    methods: Vec<SegmentKind>,
    last_step: u64,
}

impl PiecewiseSchedule {
    /// Parses the schedule grammar and binds it to a run of `steps` steps.
    ///
    /// # Errors
    /// [`Error::ScheduleMalformed`] on an unparseable token, a trailing
    /// method tag, or fewer than two anchors.
    pub fn parse(input: &str, steps: u64) -> Result<Self> {
        let malformed = |reason: &str| Error::ScheduleMalformed {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let body = input
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        if body.is_empty() {
            return Err(malformed("empty schedule"));
        }

        let mut anchors = Vec::new();
        let mut methods = Vec::new();
        for token in body.split(',') {
            let token = token.trim();
            // A method tag is only admissible between two anchors; anywhere
            // else the token must be a number.
            if anchors.len() == methods.len() + 1 {
                if let Some(kind) = SegmentKind::from_tag(token) {
                    methods.push(kind);
                    continue;
                }
                methods.push(SegmentKind::Linear);
            }
            let value: f64 = token
                .parse()
                .map_err(|_| malformed(&format!("cannot parse {token:?}")))?;
            anchors.push(value);
        }

        if anchors.len() < 2 {
            return Err(malformed("need at least two anchors"));
        }
        if methods.len() != anchors.len() - 1 {
            return Err(malformed("trailing method tag"));
        }

        Ok(Self {
            anchors,
            methods,
            last_step: steps.saturating_sub(1),
        })
    }

    /// Evaluates the schedule at step counter `c`.
    ///
    /// `c = 0` yields the first anchor exactly and any `c ≥ steps−1` the
    /// last, so the trailing `update()` after the final advance reads the
    /// final anchor.
    pub fn value_at(&self, c: u64) -> f64 {
        let n_seg = self.anchors.len() - 1;
        if self.last_step == 0 {
            return if c == 0 {
                self.anchors[0]
            } else {
                self.anchors[n_seg]
            };
        }
        if c >= self.last_step {
            return self.anchors[n_seg];
        }
        let idx = (n_seg as u64 * c / self.last_step) as usize;
        let piece_len = self.last_step as f64 / n_seg as f64;
        let progress = ((c as f64 - idx as f64 * piece_len) / piece_len).max(0.0);
        if progress == 0.0 {
            // anchors are exact, whatever the segment method
            return self.anchors[idx];
        }
        self.methods[idx].eval(self.anchors[idx], self.anchors[idx + 1], progress)
    }
}
