//! Exam timetabling domain models.
//!
//! Provides the data types for describing an examination period and its
//! solution: who sits what (groups, subjects), where (halls) and when
//! (slots), and the resulting timetable and seating plan.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling | University |
//! |-------------|--------------------|------------|
//! | Subject | Task | Exam paper |
//! | StudentGroup | Conflict clique | Cohort / programme year |
//! | Slot | Time bucket | Exam sitting |
//! | Hall | Capacity resource | Exam room |
//! | Timetable | Schedule | Exam calendar |
//! | HallAllocation | Resource plan | Seating plan |

mod allocation;
mod group;
mod hall;
mod slot;
mod subject;
mod timetable;

pub use allocation::{HallAllocation, SeatingRecord};
pub use group::StudentGroup;
pub use hall::{total_capacity, Hall};
pub use slot::{Slot, SlotGrid};
pub use subject::Subject;
pub use timetable::{Assignment, Timetable, Violation, ViolationType};
