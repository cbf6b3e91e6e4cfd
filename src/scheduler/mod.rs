//! Slot scheduling by backtracking search.
//!
//! Maps every subject to a `(day, period)` slot so that no two
//! conflicting subjects share one.
//!
//! # Algorithm
//!
//! `SlotScheduler` runs a depth-first backtracking search with a
//! minimum-remaining-values subject ordering and ascending slot order.
//! It returns the first feasible timetable; it does not optimise.
//!
//! # Control
//!
//! A step limit (`SchedulerConfig::step_limit`) and a caller-owned
//! `CancelToken` can stop the search early. Such stops are reported as
//! `TimetableError::SearchAborted`, never as proven infeasibility.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Carter, Laporte & Lee (1996), "Examination timetabling: algorithmic
//!   strategies and applications"

mod backtrack;
mod budget;
mod config;
mod domains;

pub use backtrack::SlotScheduler;
pub use budget::{AbortCause, CancelToken, SearchStats};
pub use config::{DomainStrategy, SchedulerConfig, SlotPolicy};
