//! Examination hall model.
//!
//! Halls are physical rooms. Only capacity matters for allocation, and
//! capacity is available again in every slot.

use serde::{Deserialize, Serialize};

/// An examination hall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
    /// Unique hall identifier.
    pub name: String,
    /// Seats available per slot (must be positive).
    pub capacity: u32,
}

impl Hall {
    /// Creates a hall.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Total seats across a set of halls.
pub fn total_capacity(halls: &[Hall]) -> u64 {
    halls.iter().map(|h| u64::from(h.capacity)).sum()
}
