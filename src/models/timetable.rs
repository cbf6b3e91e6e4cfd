//! Timetable (solution) model.
//!
//! A timetable assigns every subject exactly one slot of the grid.
//! Non-conflicting subjects may share a slot.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling", EJOR 140(2)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Slot, SlotGrid};

/// A complete exam timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Slot grid the timetable was built on.
    pub grid: SlotGrid,
    /// One assignment per subject, in subject input order.
    pub assignments: Vec<Assignment>,
}

/// A subject-to-slot assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned subject.
    pub subject: String,
    /// Slot the exam is held in.
    pub slot: Slot,
}

/// An invariant breach found when auditing a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (subject or hall).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of solution violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two conflicting subjects share a slot.
    ConflictingSlot,
    /// A subject has no slot.
    UnassignedSubject,
    /// A subject has more than one slot.
    DuplicateAssignment,
    /// Seated students differ from a subject's enrollment.
    SeatingMismatch,
    /// A hall is over capacity in some slot.
    CapacityExceeded,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(subject: impl Into<String>, slot: Slot) -> Self {
        Self {
            subject: subject.into(),
            slot,
        }
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Timetable {
    /// Creates an empty timetable on a grid.
    pub fn new(grid: SlotGrid) -> Self {
        Self {
            grid,
            assignments: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of assigned subjects.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Slot of a subject.
    pub fn slot_of(&self, subject: &str) -> Option<Slot> {
        self.assignments
            .iter()
            .find(|a| a.subject == subject)
            .map(|a| a.slot)
    }

    /// Subjects held in a slot, in subject input order.
    pub fn subjects_in(&self, slot: Slot) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.slot == slot)
            .map(|a| a.subject.as_str())
            .collect()
    }

    /// Subjects grouped by slot (ascending), each list in input order.
    pub fn by_slot(&self) -> BTreeMap<Slot, Vec<&str>> {
        let mut map: BTreeMap<Slot, Vec<&str>> = BTreeMap::new();
        for a in &self.assignments {
            map.entry(a.slot).or_default().push(&a.subject);
        }
        map
    }

    /// Slots holding at least one exam.
    pub fn used_slots(&self) -> BTreeSet<Slot> {
        self.assignments.iter().map(|a| a.slot).collect()
    }

    /// Number of distinct exam days in use.
    pub fn days_used(&self) -> usize {
        self.assignments
            .iter()
            .map(|a| a.slot.day)
            .collect::<BTreeSet<_>>()
            .len()
    }
}
