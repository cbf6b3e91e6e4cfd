//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// How many exams a slot may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Non-conflicting subjects may share a slot.
    #[default]
    Shared,
    /// At most one exam per slot, regardless of conflicts.
    Exclusive,
}

/// How slot legality is tracked during search.
///
/// Both strategies explore the same tree and return the same timetable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStrategy {
    /// Recompute legality from the current assignment on every query.
    #[default]
    Recompute,
    /// Maintain per-subject domains, updated on assign and restored on undo.
    Incremental,
}

/// Configuration for [`SlotScheduler`](super::SlotScheduler).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slot sharing policy.
    pub slot_policy: SlotPolicy,
    /// Legality tracking strategy.
    pub domain_strategy: DomainStrategy,
    /// Maximum number of subject selections before the search gives up.
    /// `None` = unbounded.
    pub step_limit: Option<u64>,
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot policy.
    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    /// Sets the domain strategy.
    pub fn with_domain_strategy(mut self, strategy: DomainStrategy) -> Self {
        self.domain_strategy = strategy;
        self
    }

    /// Bounds the search.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
