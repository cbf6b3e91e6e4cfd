//! Search statistics, cancellation and abort causes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Subject selections (cooperative checkpoints passed).
    pub steps: u64,
    /// Assignments undone.
    pub backtracks: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "steps={}, backtracks={}", self.steps, self.backtracks)
    }
}

/// Why a search stopped without a definitive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortCause {
    /// The configured step limit was reached.
    StepLimit(u64),
    /// The caller cancelled the search.
    Cancelled,
}

impl fmt::Display for AbortCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepLimit(limit) => write!(f, "step limit of {limit} reached"),
            Self::Cancelled => write!(f, "cancelled by caller"),
        }
    }
}

/// Caller-owned cancellation flag.
///
/// Clones share the flag, so one clone can be handed to the scheduler and
/// another kept (possibly on another thread) to cancel it. The scheduler
/// polls it before selecting each subject.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
