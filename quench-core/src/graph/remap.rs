//! Label remapping policy.
//!
//! User labels are arbitrary integers; internally spins are indices in
//! `[0, N)`. The policy controls how internal indices are assigned and
//! whether labels that never appear in an edge are allocated anyway.

use std::str::FromStr;

use crate::error::Error;

/// How internal indices are ordered relative to user labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Relabel by ascending user label.
    Sorted,
    /// Preserve first-seen order.
    Encounter,
}

/// Whether unseen labels are allocated internal indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Allocate indices for any labels in `[start, N + start)` that never
    /// appear in an edge. Useful for problems with uncoupled spins that
    /// should still be tracked.
    Fill {
        /// Lowest label the problem is assumed to use.
        start: i64,
    },
    /// Leave unseen labels unallocated; uncoupled spins stay unnamed.
    NoFill,
}

/// Combined remap policy, parsed from strings like `"sorted,fill,0"` or
/// `"encounter,no_fill"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapPolicy {
    /// Index ordering.
    pub order: SortOrder,
    /// Fill behavior.
    pub fill: FillMode,
}

impl Default for RemapPolicy {
    fn default() -> Self {
        Self {
            order: SortOrder::Sorted,
            fill: FillMode::Fill { start: 0 },
        }
    }
}

impl FromStr for RemapPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let malformed = |reason: &str| Error::RemapMalformed {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let order = match parts.first() {
            Some(&"sorted") => SortOrder::Sorted,
            Some(&"encounter") => SortOrder::Encounter,
            _ => return Err(malformed("expected `sorted` or `encounter`")),
        };
        let fill = match parts.get(1) {
            Some(&"fill") => {
                let start = parts
                    .get(2)
                    .and_then(|t| t.parse().ok())
                    .ok_or_else(|| malformed("`fill` needs an integer start"))?;
                FillMode::Fill { start }
            }
            Some(&"no_fill") => {
                if parts.len() > 2 {
                    return Err(malformed("`no_fill` takes no start value"));
                }
                FillMode::NoFill
            }
            _ => return Err(malformed("expected `fill,<start>` or `no_fill`")),
        };
        Ok(Self { order, fill })
    }
}

impl std::fmt::Display for RemapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.order {
            SortOrder::Sorted => write!(f, "sorted")?,
            SortOrder::Encounter => write!(f, "encounter")?,
        }
        match self.fill {
            FillMode::Fill { start } => write!(f, ",fill,{start}"),
            FillMode::NoFill => write!(f, ",no_fill"),
        }
    }
}
