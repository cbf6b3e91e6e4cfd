//! Exam hall allocation.
//!
//! Seats the subjects of a finished [`Timetable`](crate::models::Timetable)
//! in halls, slot by slot. A subject may be split across halls and a hall
//! may hold several subjects of one slot; every hall's capacity is available
//! afresh in each slot.
//!
//! # Reference
//! Carter & Laporte (1996), "Recent Developments in Practical Examination
//! Timetabling", Sec. 4: Room assignment

mod greedy;

pub use greedy::{AllocatorConfig, HallAllocator};
