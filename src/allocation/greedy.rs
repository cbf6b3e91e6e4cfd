//! Greedy capacity-bounded hall allocator.
//!
//! # Algorithm
//!
//! For each used slot, in ascending order:
//! 1. Sum the enrollment of the subjects held in the slot; if it exceeds
//!    the total seats of all halls, fail for this slot.
//! 2. Order halls by descending capacity (stable: equal halls keep input
//!    order).
//! 3. For each subject in timetable order, fill halls in that order, each
//!    up to its remaining seats (and the per-subject cap, if any), until the
//!    subject is seated. Halls are shared between subjects of one slot;
//!    seats reset in the next slot.
//!
//! # Complexity
//! O(s · h) per slot, s = subjects in the slot, h = halls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{Result, TimetableError};
use crate::models::{total_capacity, Hall, HallAllocation, SeatingRecord, Slot, Subject, Timetable};
use crate::validation::{validate_halls, ValidationError, ValidationErrorKind, ValidationResult};

/// Configuration for [`HallAllocator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Maximum students of one subject per hall. `None` = no cap.
    ///
    /// A cap mixes subjects across halls; students it leaves unseated fail
    /// the slot.
    pub per_subject_limit: Option<u32>,
}

impl AllocatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the students of one subject per hall.
    pub fn with_per_subject_limit(mut self, limit: u32) -> Self {
        self.per_subject_limit = Some(limit);
        self
    }

    /// Checks that the cap, if set, is positive.
    pub fn validate(&self) -> ValidationResult {
        if self.per_subject_limit == Some(0) {
            return Err(vec![ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                "Per-subject limit must be positive",
            )]);
        }
        Ok(())
    }
}

/// Greedy hall allocator.
///
/// # Example
///
/// ```
/// use u_timetable::allocation::HallAllocator;
/// use u_timetable::models::{Assignment, Hall, Slot, SlotGrid, Subject, Timetable};
///
/// let mut timetable = Timetable::new(SlotGrid::new(1, 1));
/// timetable.add_assignment(Assignment::new("Math", Slot::new(0, 0)));
/// let subjects = vec![Subject::new("Math").with_enrollment(70)];
/// let halls = vec![Hall::new("Small", 30), Hall::new("Large", 50)];
///
/// let allocation = HallAllocator::new()
///     .allocate(&timetable, &subjects, &halls)
///     .unwrap();
/// assert_eq!(allocation.occupancy("Large", Slot::new(0, 0)), 50);
/// assert_eq!(allocation.occupancy("Small", Slot::new(0, 0)), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HallAllocator {
    config: AllocatorConfig,
}

impl HallAllocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Seats every subject of `timetable` in `halls`.
    ///
    /// # Errors
    /// - `InvalidInput`: a zero per-subject cap, invalid halls, or a
    ///   timetable subject missing from `subjects`.
    /// - `InsufficientCapacity`: the first slot (ascending) that cannot be
    ///   seated. No partial allocation is returned.
    #[instrument(skip_all, fields(
        subjects = timetable.assignment_count(),
        halls = halls.len(),
    ))]
    pub fn allocate(
        &self,
        timetable: &Timetable,
        subjects: &[Subject],
        halls: &[Hall],
    ) -> Result<HallAllocation> {
        let mut errors = self.config.validate().err().unwrap_or_default();
        if let Err(mut e) = validate_halls(halls) {
            errors.append(&mut e);
        }
        if !errors.is_empty() {
            return Err(TimetableError::InvalidInput(errors));
        }

        let enrollment: HashMap<&str, u32> = subjects
            .iter()
            .map(|s| (s.name.as_str(), s.enrollment))
            .collect();
        let missing: Vec<ValidationError> = timetable
            .assignments
            .iter()
            .filter(|a| !enrollment.contains_key(a.subject.as_str()))
            .map(|a| {
                ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Timetable subject '{}' has no enrollment", a.subject),
                )
            })
            .collect();
        if !missing.is_empty() {
            return Err(TimetableError::InvalidInput(missing));
        }

        let order = sorted_halls(halls);
        let available = total_capacity(halls);
        let mut allocation = HallAllocation::new();

        for (slot, names) in timetable.by_slot() {
            let seated: Vec<(&str, u32)> = names.iter().map(|n| (*n, enrollment[n])).collect();
            allocation.extend(self.allocate_slot(slot, &seated, &order, available)?);
        }

        info!(
            records = allocation.record_count(),
            seated = allocation.total_seated(),
            "halls allocated"
        );
        Ok(allocation)
    }

    fn allocate_slot(
        &self,
        slot: Slot,
        subjects: &[(&str, u32)],
        halls: &[&Hall],
        available: u64,
    ) -> Result<HallAllocation> {
        let required: u64 = subjects.iter().map(|&(_, n)| u64::from(n)).sum();
        if required > available {
            return Err(TimetableError::InsufficientCapacity {
                slot,
                required,
                available,
                shortfall: required - available,
            });
        }

        let cap = self.config.per_subject_limit.unwrap_or(u32::MAX);
        let mut free: Vec<u32> = halls.iter().map(|h| h.capacity).collect();
        let mut allocation = HallAllocation::new();
        let mut unseated: u64 = 0;

        for &(subject, students) in subjects {
            let mut left = students;
            for (hall, seats) in halls.iter().zip(free.iter_mut()) {
                if left == 0 {
                    break;
                }
                if *seats == 0 {
                    continue;
                }
                let placed = left.min(*seats).min(cap);
                allocation.add_record(SeatingRecord::new(&hall.name, slot, subject, placed));
                *seats -= placed;
                left -= placed;
            }
            unseated += u64::from(left);
        }

        if unseated > 0 {
            return Err(TimetableError::InsufficientCapacity {
                slot,
                required,
                available,
                shortfall: unseated,
            });
        }

        debug!(
            %slot,
            subjects = subjects.len(),
            required,
            records = allocation.record_count(),
            "slot seated"
        );
        Ok(allocation)
    }
}

/// Halls by descending capacity; ties keep input order.
fn sorted_halls(halls: &[Hall]) -> Vec<&Hall> {
    let mut order: Vec<&Hall> = halls.iter().collect();
    order.sort_by(|a, b| b.capacity.cmp(&a.capacity));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Assignment, SlotGrid};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn timetable(entries: &[(&str, Slot)]) -> Timetable {
        let mut t = Timetable::new(SlotGrid::new(3, 3));
        for (s, slot) in entries {
            t.add_assignment(Assignment::new(*s, *slot));
        }
        t
    }

    fn subjects(entries: &[(&str, u32)]) -> Vec<Subject> {
        entries
            .iter()
            .map(|(n, e)| Subject::new(*n).with_enrollment(*e))
            .collect()
    }

    fn records(a: &HallAllocation) -> Vec<(&str, Slot, &str, u32)> {
        a.records
            .iter()
            .map(|r| (r.hall.as_str(), r.slot, r.subject.as_str(), r.students))
            .collect()
    }

    #[test]
    fn test_separate_slots_reuse_hall() {
        let s0 = Slot::new(0, 0);
        let s1 = Slot::new(0, 1);
        let t = timetable(&[("Math", s0), ("Physics", s1)]);
        let subs = subjects(&[("Math", 25), ("Physics", 25)]);
        let halls = vec![Hall::new("Hall-1", 60)];

        let a = HallAllocator::new().allocate(&t, &subs, &halls).unwrap();
        assert_eq!(
            records(&a),
            vec![("Hall-1", s0, "Math", 25), ("Hall-1", s1, "Physics", 25)]
        );
    }

    #[test]
    fn test_subjects_share_hall_within_slot() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("X", s0), ("Y", s0)]);
        let subs = subjects(&[("X", 50), ("Y", 30)]);
        let halls = vec![Hall::new("H2", 40), Hall::new("H1", 60)];

        let a = HallAllocator::new().allocate(&t, &subs, &halls).unwrap();
        assert_eq!(
            records(&a),
            vec![
                ("H1", s0, "X", 50),
                ("H1", s0, "Y", 10),
                ("H2", s0, "Y", 20),
            ]
        );
    }

    #[test]
    fn test_hall_ties_keep_input_order() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("Big", s0)]);
        let subs = subjects(&[("Big", 120)]);
        let halls = vec![Hall::new("A", 30), Hall::new("B", 50), Hall::new("C", 50)];

        let a = HallAllocator::new().allocate(&t, &subs, &halls).unwrap();
        assert_eq!(
            records(&a),
            vec![("B", s0, "Big", 50), ("C", s0, "Big", 50), ("A", s0, "Big", 20)]
        );
    }

    #[test]
    fn test_insufficient_capacity_reports_shortfall() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("Math", s0)]);
        let subs = subjects(&[("Math", 100)]);
        let halls = vec![Hall::new("H1", 50)];

        let err = HallAllocator::new().allocate(&t, &subs, &halls).unwrap_err();
        assert_eq!(
            err,
            TimetableError::InsufficientCapacity {
                slot: s0,
                required: 100,
                available: 50,
                shortfall: 50,
            }
        );
    }

    #[test]
    fn test_cumulative_slot_enrollment_checked() {
        // Each subject fits alone, together they do not.
        let s0 = Slot::new(0, 0);
        let s1 = Slot::new(1, 0);
        let t = timetable(&[("A", s1), ("B", s1), ("C", s0)]);
        let subs = subjects(&[("A", 40), ("B", 40), ("C", 10)]);
        let halls = vec![Hall::new("H1", 30), Hall::new("H2", 30)];

        let err = HallAllocator::new().allocate(&t, &subs, &halls).unwrap_err();
        match err {
            TimetableError::InsufficientCapacity {
                slot, shortfall, ..
            } => {
                assert_eq!(slot, s1);
                assert_eq!(shortfall, 20);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_enrollment_produces_no_records() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("Art", s0), ("Math", s0)]);
        let subs = subjects(&[("Art", 0), ("Math", 5)]);
        let a = HallAllocator::new()
            .allocate(&t, &subs, &[Hall::new("H", 10)])
            .unwrap();
        assert_eq!(records(&a), vec![("H", s0, "Math", 5)]);
    }

    #[test]
    fn test_no_halls() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("Art", s0)]);
        let a = HallAllocator::new()
            .allocate(&t, &subjects(&[("Art", 0)]), &[])
            .unwrap();
        assert_eq!(a.record_count(), 0);

        let err = HallAllocator::new()
            .allocate(&t, &subjects(&[("Art", 1)]), &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientCapacity);
    }

    #[test]
    fn test_per_subject_limit_mixes_halls() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("X", s0), ("Y", s0)]);
        let subs = subjects(&[("X", 50), ("Y", 40)]);
        let halls = vec![Hall::new("H1", 60), Hall::new("H2", 60)];
        let allocator =
            HallAllocator::new().with_config(AllocatorConfig::new().with_per_subject_limit(30));

        let a = allocator.allocate(&t, &subs, &halls).unwrap();
        assert_eq!(
            records(&a),
            vec![
                ("H1", s0, "X", 30),
                ("H2", s0, "X", 20),
                ("H1", s0, "Y", 30),
                ("H2", s0, "Y", 10),
            ]
        );
    }

    #[test]
    fn test_per_subject_limit_can_leave_students_unseated() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("X", s0)]);
        let subs = subjects(&[("X", 50)]);
        let allocator =
            HallAllocator::new().with_config(AllocatorConfig::new().with_per_subject_limit(10));

        let err = allocator
            .allocate(&t, &subs, &[Hall::new("H1", 100)])
            .unwrap_err();
        assert_eq!(
            err,
            TimetableError::InsufficientCapacity {
                slot: s0,
                required: 50,
                available: 100,
                shortfall: 40,
            }
        );
    }

    #[test]
    fn test_zero_per_subject_limit_rejected() {
        let t = timetable(&[("X", Slot::new(0, 0))]);
        let allocator =
            HallAllocator::new().with_config(AllocatorConfig::new().with_per_subject_limit(0));

        let err = allocator
            .allocate(&t, &subjects(&[("X", 10)]), &[Hall::new("H1", 50)])
            .unwrap_err();
        match err {
            TimetableError::InvalidInput(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidConfig);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subject_rejected() {
        let t = timetable(&[("Ghost", Slot::new(0, 0))]);
        let err = HallAllocator::new()
            .allocate(&t, &[], &[Hall::new("H", 10)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_invalid_halls_rejected() {
        let t = timetable(&[]);
        let err = HallAllocator::new()
            .allocate(&t, &[], &[Hall::new("H", 0), Hall::new("H", 5)])
            .unwrap_err();
        match err {
            TimetableError::InvalidInput(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_seating_invariants_on_generated_instances() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let entries: Vec<(&str, Slot)> = names
                .iter()
                .map(|n| (*n, Slot::new(rng.random_range(0..2), rng.random_range(0..2))))
                .collect();
            let t = timetable(&entries);
            let subs: Vec<Subject> = names
                .iter()
                .map(|n| Subject::new(*n).with_enrollment(rng.random_range(0..60)))
                .collect();
            let hall_count: usize = rng.random_range(1..=4);
            let halls: Vec<Hall> = (0..hall_count)
                .map(|i| Hall::new(format!("H{i}"), rng.random_range(1..=80)))
                .collect();
            let capacity = total_capacity(&halls);

            let worst = t
                .by_slot()
                .values()
                .map(|ns| {
                    ns.iter()
                        .map(|n| u64::from(subs.iter().find(|s| s.name == *n).unwrap().enrollment))
                        .sum::<u64>()
                })
                .max()
                .unwrap_or(0);

            match HallAllocator::new().allocate(&t, &subs, &halls) {
                Ok(a) => {
                    assert!(worst <= capacity);
                    for s in &subs {
                        let slot = t.slot_of(&s.name).unwrap();
                        assert_eq!(a.seated(slot, &s.name), u64::from(s.enrollment));
                    }
                    for slot in t.used_slots() {
                        for h in &halls {
                            assert!(a.occupancy(&h.name, slot) <= u64::from(h.capacity));
                        }
                    }
                    assert!(a.records.iter().all(|r| r.students > 0));
                }
                Err(e) => {
                    assert!(worst > capacity, "unexpected failure: {e}");
                    assert_eq!(e.kind(), ErrorKind::InsufficientCapacity);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let s0 = Slot::new(0, 0);
        let t = timetable(&[("X", s0), ("Y", s0), ("Z", Slot::new(0, 1))]);
        let subs = subjects(&[("X", 45), ("Y", 35), ("Z", 70)]);
        let halls = vec![Hall::new("A", 40), Hall::new("B", 40), Hall::new("C", 20)];
        let first = HallAllocator::new().allocate(&t, &subs, &halls).unwrap();
        let second = HallAllocator::new().allocate(&t, &subs, &halls).unwrap();
        assert_eq!(first, second);
    }
}
