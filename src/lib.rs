//! Exam timetabling for the U-Engine ecosystem.
//!
//! Places each subject's exam in a `(day, slot)` so that no student group
//! sits two exams at once, then seats every exam in capacity-bounded halls.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `StudentGroup`, `Hall`, `Slot`,
//!   `SlotGrid`, `Timetable`, `HallAllocation`
//! - **`validation`**: Input integrity checks and solution audit
//! - **`conflict`**: Subject conflict graph derived from group enrollment
//! - **`scheduler`**: MRV backtracking slot scheduler
//! - **`allocation`**: Greedy per-slot hall allocator
//! - **`solver`**: End-to-end pipeline over a serde-loadable request
//! - **`kpi`**: Timetable quality metrics
//! - **`export`**: CSV tables of a solution
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Hall, StudentGroup};
//! use u_timetable::solver::{ExamRequest, ExamSolver};
//!
//! let request = ExamRequest::new(2, 2)
//!     .with_subject("Math")
//!     .with_subject("Physics")
//!     .with_subject("Art")
//!     .with_group(StudentGroup::new("Science", 40).with_subjects(["Math", "Physics"]))
//!     .with_group(StudentGroup::new("Arts", 15).with_subjects(["Art"]))
//!     .with_hall(Hall::new("Main", 50));
//!
//! let solution = ExamSolver::new().solve(&request).unwrap();
//! assert_eq!(solution.timetable.assignment_count(), 3);
//! ```
//!
//! # References
//!
//! - Carter & Laporte (1996), "Recent Developments in Practical Examination
//!   Timetabling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//!   Ch. 6: Constraint Satisfaction Problems

pub mod allocation;
pub mod conflict;
pub mod error;
pub mod export;
pub mod kpi;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use error::{Result, TimetableError};
