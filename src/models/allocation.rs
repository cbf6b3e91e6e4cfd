//! Hall allocation (seating) model.

use serde::{Deserialize, Serialize};

use super::Slot;

/// Students of one subject seated in one hall during one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingRecord {
    /// Hall identifier.
    pub hall: String,
    /// Slot of the sitting.
    pub slot: Slot,
    /// Subject being examined.
    pub subject: String,
    /// Number of students seated.
    pub students: u32,
}

/// Ordered seating plan for a whole timetable.
///
/// Records are ordered by slot, then subject order within the slot, then
/// hall order (largest hall first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallAllocation {
    /// Seating records.
    pub records: Vec<SeatingRecord>,
}

impl SeatingRecord {
    /// Creates a record.
    pub fn new(
        hall: impl Into<String>,
        slot: Slot,
        subject: impl Into<String>,
        students: u32,
    ) -> Self {
        Self {
            hall: hall.into(),
            slot,
            subject: subject.into(),
            students,
        }
    }
}

impl HallAllocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn add_record(&mut self, record: SeatingRecord) {
        self.records.push(record);
    }

    /// Appends all records of another allocation.
    pub fn extend(&mut self, other: HallAllocation) {
        self.records.extend(other.records);
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Total students seated across all records.
    pub fn total_seated(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.students)).sum()
    }

    /// Students of `subject` seated in `slot` across all halls.
    pub fn seated(&self, slot: Slot, subject: &str) -> u64 {
        self.records
            .iter()
            .filter(|r| r.slot == slot && r.subject == subject)
            .map(|r| u64::from(r.students))
            .sum()
    }

    /// Seats used in `hall` during `slot` across all subjects.
    pub fn occupancy(&self, hall: &str, slot: Slot) -> u64 {
        self.records
            .iter()
            .filter(|r| r.slot == slot && r.hall == hall)
            .map(|r| u64::from(r.students))
            .sum()
    }

    /// Records of one slot.
    pub fn records_for_slot(&self, slot: Slot) -> Vec<&SeatingRecord> {
        self.records.iter().filter(|r| r.slot == slot).collect()
    }

    /// Records of one hall.
    pub fn records_for_hall(&self, hall: &str) -> Vec<&SeatingRecord> {
        self.records.iter().filter(|r| r.hall == hall).collect()
    }
}
