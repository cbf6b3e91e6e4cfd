//! Error types.
//!
//! Every failure the solver can report is an expected, recoverable outcome:
//! bad input, an infeasible (or abandoned) search, or a slot that cannot be
//! seated. Callers match on [`TimetableError::kind`] to translate them.

use thiserror::Error;

use crate::models::Slot;
use crate::scheduler::{AbortCause, SearchStats};
use crate::validation::ValidationError;

/// Result alias for solver operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors reported by the conflict model, scheduler and allocator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    /// Malformed input, detected before any search.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The search space was exhausted: no conflict-free timetable exists.
    #[error("no conflict-free timetable exists ({stats})")]
    Infeasible { stats: SearchStats },

    /// The search stopped before it could prove or disprove feasibility.
    #[error("search aborted: {cause} ({stats})")]
    SearchAborted { cause: AbortCause, stats: SearchStats },

    /// Scheduling succeeded but a slot cannot be seated.
    #[error(
        "insufficient hall capacity for {slot}: {required} students, {available} seats, short by {shortfall}"
    )]
    InsufficientCapacity {
        slot: Slot,
        required: u64,
        available: u64,
        shortfall: u64,
    },
}

/// Coarse error classification for caller-side translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Infeasible,
    InsufficientCapacity,
}

impl TimetableError {
    /// Creates an `InvalidInput` error from a single validation error.
    pub fn invalid(error: ValidationError) -> Self {
        Self::InvalidInput(vec![error])
    }

    /// Coarse classification. An aborted search counts as infeasible.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Infeasible { .. } | Self::SearchAborted { .. } => ErrorKind::Infeasible,
            Self::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
        }
    }

    /// Whether no timetable was produced by the search, proven or not.
    pub fn is_infeasible(&self) -> bool {
        self.kind() == ErrorKind::Infeasible
    }

    /// Whether infeasibility was proven by exhausting the search space.
    pub fn is_proven_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }

    /// Search statistics, when the error came from the scheduler.
    pub fn search_stats(&self) -> Option<&SearchStats> {
        match self {
            Self::Infeasible { stats } | Self::SearchAborted { stats, .. } => Some(stats),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while exporting tables.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
