//! Error taxonomy for problem ingestion, schedule parsing, and the run
//! lifecycle.
//!
//! Fatal conditions surface as [`Error`] values at the earliest boundary
//! (ingestion, engine construction, or a lifecycle transition). Non-fatal
//! conditions (mismatched edge counts, empty problems, uncoupled spins) are
//! reported through `tracing::warn!` and the run proceeds. The annealing hot
//! loop itself never returns errors.

use thiserror::Error;

/// Fatal error conditions.
#[derive(Debug, Error)]
pub enum Error {
    /// A user label exceeds the declared number of spins under the `fill`
    /// remap policy.
    #[error(
        "inconsistent labels under fill remap: label {label} found, \
         labels must be smaller than {limit}"
    )]
    InconsistentLabels {
        /// The offending user label.
        label: i64,
        /// One past the largest admissible label (`n_vert + fill_start`).
        limit: i64,
    },

    /// More distinct spins were found in the edges than were declared.
    #[error("{declared} spins declared but {found} distinct spins found")]
    UnderDeclared {
        /// Declared number of spins.
        declared: usize,
        /// Distinct labels observed in the edge set.
        found: usize,
    },

    /// A schedule string could not be parsed.
    #[error("malformed schedule {input:?}: {reason}")]
    ScheduleMalformed {
        /// The schedule string as given.
        input: String,
        /// What went wrong.
        reason: String,
    },

    /// A remap policy string could not be parsed.
    #[error("malformed remap policy {input:?}: {reason}")]
    RemapMalformed {
        /// The policy string as given.
        input: String,
        /// What went wrong.
        reason: String,
    },

    /// An edge line in a problem file is missing tokens or carries an
    /// unparseable token.
    #[error("malformed edge on line {line}: {reason}")]
    EdgeMalformed {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A problem file is missing its `# N M` header line.
    #[error("problem header {header:?} not formatted as `# n_vert n_edge`")]
    HeaderMalformed {
        /// The offending line.
        header: String,
    },

    /// A lifecycle method was called out of order.
    #[error("lifecycle violation: {0}")]
    BoundaryViolation(&'static str),
}

/// Crate-local result alias.
pub type Result<T> = core::result::Result<T, Error>;
