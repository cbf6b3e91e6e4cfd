//! Exam slot and slot grid.
//!
//! An examination period is a grid of `days × slots_per_day` slots.
//! Indices are zero-based internally; `Display` renders them one-based
//! the way timetables are printed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single exam slot: `(day, period)`.
///
/// Ordering is ascending by day, then by period within the day. The
/// scheduler enumerates candidates in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Slot {
    /// Zero-based day index.
    pub day: u32,
    /// Zero-based slot index within the day.
    pub period: u32,
}

impl Slot {
    /// Creates a slot from zero-based indices.
    pub fn new(day: u32, period: u32) -> Self {
        Self { day, period }
    }

    /// One-based day number, as shown to users.
    #[inline]
    pub fn day_number(&self) -> u32 {
        self.day + 1
    }

    /// One-based slot-in-day number, as shown to users.
    #[inline]
    pub fn period_number(&self) -> u32 {
        self.period + 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}, Slot {}", self.day_number(), self.period_number())
    }
}

/// The slot grid of an examination period.
///
/// # Invariant
/// A usable grid has `days >= 1` and `slots_per_day >= 1`; see
/// [`SlotGrid::is_valid`]. Validation rejects anything else before search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    /// Number of exam days.
    pub days: u32,
    /// Number of exam slots per day.
    pub slots_per_day: u32,
}

impl SlotGrid {
    /// Creates a grid.
    pub fn new(days: u32, slots_per_day: u32) -> Self {
        Self {
            days,
            slots_per_day,
        }
    }

    /// Whether the grid has at least one slot.
    pub fn is_valid(&self) -> bool {
        self.days >= 1 && self.slots_per_day >= 1
    }

    /// Total number of slots (`days × slots_per_day`).
    #[inline]
    pub fn total_slots(&self) -> usize {
        self.days as usize * self.slots_per_day as usize
    }

    /// The slot at a dense index (ascending order).
    ///
    /// Returns `None` when `index >= total_slots()`.
    pub fn slot_at(&self, index: usize) -> Option<Slot> {
        if index >= self.total_slots() {
            return None;
        }
        let per_day = self.slots_per_day as usize;
        Some(Slot::new((index / per_day) as u32, (index % per_day) as u32))
    }

    /// Dense index of a slot, or `None` if it lies outside the grid.
    pub fn index_of(&self, slot: Slot) -> Option<usize> {
        if slot.day >= self.days || slot.period >= self.slots_per_day {
            return None;
        }
        Some(slot.day as usize * self.slots_per_day as usize + slot.period as usize)
    }

    /// Whether the slot lies inside the grid.
    pub fn contains(&self, slot: Slot) -> bool {
        self.index_of(slot).is_some()
    }

    /// All slots in ascending `(day, period)` order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.days).flat_map(move |d| (0..self.slots_per_day).map(move |p| Slot::new(d, p)))
    }
}
