//! Input validation and solution auditing.
//!
//! [`validate_input`] checks structural integrity of an exam problem
//! before scheduling. Detects:
//! - Duplicate IDs (subjects, groups, halls)
//! - Empty IDs
//! - Groups referencing unknown subjects
//! - Groups with no subjects or no students
//! - Subjects whose summed group sizes overflow `u32`
//! - Halls with no seats
//! - Empty slot grids
//!
//! [`audit_solution`] re-checks a finished timetable and seating plan
//! against the hard constraints and reports every breach as a
//! [`Violation`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::conflict::ConflictGraph;
use crate::models::{
    HallAllocation, Hall, SlotGrid, StudentGroup, Subject, Timetable, Violation, ViolationType,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// A group references a subject that doesn't exist.
    UnknownSubject,
    /// A group takes no subjects.
    EmptyGroup,
    /// A group has no students.
    NonPositiveSize,
    /// A hall has no seats.
    NonPositiveCapacity,
    /// The slot grid has no days or no slots per day.
    InvalidGrid,
    /// A subject's total enrollment does not fit in `u32`.
    EnrollmentOverflow,
    /// A solver setting is out of range.
    InvalidConfig,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an exam timetabling problem.
///
/// Checks:
/// 1. The grid has at least one day and one slot per day
/// 2. No empty or duplicate subject IDs
/// 3. No empty or duplicate group IDs; every group has students and subjects
/// 4. Every subject a group takes is in the subject list
/// 5. No empty or duplicate hall IDs; every hall has seats
/// 6. Every subject's enrollment fits in `u32`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<S: AsRef<str>>(
    subjects: &[S],
    groups: &[StudentGroup],
    halls: &[Hall],
    grid: &SlotGrid,
) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(mut e) = validate_grid(grid) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_enrollment(subjects, groups) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_halls(halls) {
        errors.append(&mut e);
    }

    finish(errors)
}

/// Validates the slot grid.
pub fn validate_grid(grid: &SlotGrid) -> ValidationResult {
    let mut errors = Vec::new();
    if grid.days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGrid,
            "Days must be positive",
        ));
    }
    if grid.slots_per_day == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGrid,
            "Slots per day must be positive",
        ));
    }
    finish(errors)
}

/// Validates subjects and the groups that reference them.
pub fn validate_enrollment<S: AsRef<str>>(
    subjects: &[S],
    groups: &[StudentGroup],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut subject_ids = HashSet::new();
    for s in subjects {
        let id = s.as_ref();
        if id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Subject ID must not be empty",
            ));
        } else if !subject_ids.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {id}"),
            ));
        }
    }

    let mut group_ids = HashSet::new();
    for g in groups {
        if g.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Group ID must not be empty",
            ));
        } else if !group_ids.insert(g.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate group ID: {}", g.name),
            ));
        }

        if g.size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSize,
                format!("Group '{}' must have positive size", g.name),
            ));
        }
        if g.subjects.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                format!("Group '{}' takes no subjects", g.name),
            ));
        }
    }

    if let Err(mut e) = check_subject_references(&subject_ids, groups) {
        errors.append(&mut e);
    }

    let mut totals: HashMap<&str, u64> = HashMap::new();
    for g in groups {
        for s in g.distinct_subjects() {
            *totals.entry(s).or_insert(0) += u64::from(g.size);
        }
    }
    for s in subjects {
        let id = s.as_ref();
        if let Some(&total) = totals.get(id) {
            if total > u64::from(u32::MAX) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EnrollmentOverflow,
                    format!("Subject '{id}' enrollment {total} exceeds {}", u32::MAX),
                ));
            }
        }
    }

    finish(errors)
}

/// Checks that every subject referenced by a group exists.
pub(crate) fn check_subject_references(
    subject_ids: &HashSet<&str>,
    groups: &[StudentGroup],
) -> ValidationResult {
    let mut errors = Vec::new();
    for g in groups {
        for s in g.distinct_subjects() {
            if !subject_ids.contains(s) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Group '{}' references unknown subject '{s}'", g.name),
                ));
            }
        }
    }
    finish(errors)
}

/// Validates halls.
pub fn validate_halls(halls: &[Hall]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut hall_ids = HashSet::new();
    for h in halls {
        if h.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Hall ID must not be empty",
            ));
        } else if !hall_ids.insert(h.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate hall ID: {}", h.name),
            ));
        }
        if h.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!("Hall '{}' must have positive capacity", h.name),
            ));
        }
    }
    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Audits a finished solution against the hard constraints.
///
/// Reports:
/// - subjects without a slot, or with more than one
/// - conflicting subjects sharing a slot
/// - `(slot, subject)` pairs whose seated total differs from enrollment
/// - `(hall, slot)` pairs over capacity
///
/// An empty vector means the solution is sound.
pub fn audit_solution(
    subjects: &[Subject],
    graph: &ConflictGraph,
    timetable: &Timetable,
    allocation: &HallAllocation,
    halls: &[Hall],
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for a in &timetable.assignments {
        *counts.entry(a.subject.as_str()).or_insert(0) += 1;
    }
    for s in subjects {
        match counts.get(s.name.as_str()).copied().unwrap_or(0) {
            0 => violations.push(Violation::new(
                ViolationType::UnassignedSubject,
                &s.name,
                format!("Subject '{}' has no slot", s.name),
            )),
            1 => {}
            n => violations.push(Violation::new(
                ViolationType::DuplicateAssignment,
                &s.name,
                format!("Subject '{}' is assigned {n} slots", s.name),
            )),
        }
    }

    for (a, b) in graph.edges() {
        if let (Some(sa), Some(sb)) = (timetable.slot_of(a), timetable.slot_of(b)) {
            if sa == sb {
                violations.push(Violation::new(
                    ViolationType::ConflictingSlot,
                    a,
                    format!("Conflicting subjects '{a}' and '{b}' share {sa}"),
                ));
            }
        }
    }

    for s in subjects {
        if let Some(slot) = timetable.slot_of(&s.name) {
            let seated = allocation.seated(slot, &s.name);
            if seated != u64::from(s.enrollment) {
                violations.push(Violation::new(
                    ViolationType::SeatingMismatch,
                    &s.name,
                    format!(
                        "Subject '{}' seats {seated} of {} students in {slot}",
                        s.name, s.enrollment
                    ),
                ));
            }
        }
    }

    for slot in timetable.used_slots() {
        for h in halls {
            let used = allocation.occupancy(&h.name, slot);
            if used > u64::from(h.capacity) {
                violations.push(Violation::new(
                    ViolationType::CapacityExceeded,
                    &h.name,
                    format!(
                        "Hall '{}' seats {used} of {} in {slot}",
                        h.name, h.capacity
                    ),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, SeatingRecord, Slot};

    fn sample_groups() -> Vec<StudentGroup> {
        vec![
            StudentGroup::new("G1", 30).with_subjects(["Math", "Physics"]),
            StudentGroup::new("G2", 20).with_subject("Chemistry"),
        ]
    }

    fn sample_subjects() -> Vec<&'static str> {
        vec!["Math", "Physics", "Chemistry"]
    }

    fn sample_halls() -> Vec<Hall> {
        vec![Hall::new("H1", 40), Hall::new("H2", 20)]
    }

    #[test]
    fn test_valid_input() {
        let grid = SlotGrid::new(2, 2);
        assert!(
            validate_input(&sample_subjects(), &sample_groups(), &sample_halls(), &grid).is_ok()
        );
    }

    #[test]
    fn test_duplicate_subject_id() {
        let errors = validate_enrollment(&["Math", "Math"], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("subject")));
    }

    #[test]
    fn test_duplicate_group_and_hall_ids() {
        let groups = vec![
            StudentGroup::new("G1", 10).with_subject("Math"),
            StudentGroup::new("G1", 10).with_subject("Math"),
        ];
        let errors = validate_enrollment(&["Math"], &groups).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("group")));

        let halls = vec![Hall::new("H1", 10), Hall::new("H1", 20)];
        let errors = validate_halls(&halls).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("hall")));
    }

    #[test]
    fn test_unknown_subject() {
        let groups = vec![StudentGroup::new("G1", 10).with_subjects(["Math", "Latin"])];
        let errors = validate_enrollment(&["Math"], &groups).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownSubject);
        assert!(errors[0].message.contains("Latin"));
    }

    #[test]
    fn test_empty_and_zero_sized_group() {
        let groups = vec![StudentGroup::new("G1", 0)];
        let errors = validate_enrollment(&["Math"], &groups).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveSize));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyGroup));
    }

    #[test]
    fn test_enrollment_overflow() {
        let groups = vec![
            StudentGroup::new("G1", 3_000_000_000).with_subject("Math"),
            StudentGroup::new("G2", 3_000_000_000).with_subjects(["Math", "Art"]),
        ];
        let errors = validate_enrollment(&["Math", "Art"], &groups).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EnrollmentOverflow);
        assert!(errors[0].message.contains("Math"));
    }

    #[test]
    fn test_zero_capacity_hall() {
        let errors = validate_halls(&[Hall::new("H1", 0)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveCapacity);
    }

    #[test]
    fn test_empty_ids() {
        let errors = validate_enrollment(&[" "], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
        let errors = validate_halls(&[Hall::new("", 5)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
    }

    #[test]
    fn test_invalid_grid() {
        let errors = validate_grid(&SlotGrid::new(0, 0)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidGrid));
    }

    #[test]
    fn test_multiple_errors() {
        let groups = vec![StudentGroup::new("G1", 0).with_subject("Unknown")];
        let halls = vec![Hall::new("H1", 0)];
        let errors =
            validate_input(&["Math", "Math"], &groups, &halls, &SlotGrid::new(0, 1)).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_audit_sound_solution() {
        let groups = sample_groups();
        let subjects = Subject::derive_all(&sample_subjects(), &groups);
        let graph = ConflictGraph::build(&subjects, &groups).unwrap();

        let mut timetable = Timetable::new(SlotGrid::new(1, 2));
        timetable.add_assignment(Assignment::new("Math", Slot::new(0, 0)));
        timetable.add_assignment(Assignment::new("Physics", Slot::new(0, 1)));
        timetable.add_assignment(Assignment::new("Chemistry", Slot::new(0, 0)));

        let mut allocation = HallAllocation::new();
        allocation.add_record(SeatingRecord::new("H1", Slot::new(0, 0), "Math", 30));
        allocation.add_record(SeatingRecord::new("H1", Slot::new(0, 0), "Chemistry", 10));
        allocation.add_record(SeatingRecord::new("H2", Slot::new(0, 0), "Chemistry", 10));
        allocation.add_record(SeatingRecord::new("H1", Slot::new(0, 1), "Physics", 30));

        let violations = audit_solution(&subjects, &graph, &timetable, &allocation, &sample_halls());
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_audit_detects_breaches() {
        let groups = sample_groups();
        let subjects = Subject::derive_all(&sample_subjects(), &groups);
        let graph = ConflictGraph::build(&subjects, &groups).unwrap();

        let mut timetable = Timetable::new(SlotGrid::new(1, 2));
        timetable.add_assignment(Assignment::new("Math", Slot::new(0, 0)));
        timetable.add_assignment(Assignment::new("Physics", Slot::new(0, 0)));

        let mut allocation = HallAllocation::new();
        allocation.add_record(SeatingRecord::new("H2", Slot::new(0, 0), "Math", 30));
        allocation.add_record(SeatingRecord::new("H1", Slot::new(0, 0), "Physics", 30));

        let violations = audit_solution(&subjects, &graph, &timetable, &allocation, &sample_halls());
        let has = |t: ViolationType| violations.iter().any(|v| v.violation_type == t);
        assert!(has(ViolationType::UnassignedSubject));
        assert!(has(ViolationType::ConflictingSlot));
        assert!(has(ViolationType::CapacityExceeded));
        assert!(!has(ViolationType::SeatingMismatch));
    }
}
