//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a timetable and its hall allocation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Slots used | Distinct slots holding at least one exam |
//! | Days used | Distinct days holding at least one exam |
//! | Max exams per slot | Largest number of subjects sharing a slot |
//! | Peak slot enrollment | Largest number of students seated in one slot |
//! | Seat utilization | Seated students / (total seats × slots used) |
//! | Per-hall utilization | Hall's seated students / (capacity × slots used) |
//!
//! # Reference
//! McCollum et al. (2012), "A New Model for Automated Examination
//! Timetabling", Sec. 3: Evaluation measures

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{total_capacity, Hall, HallAllocation, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Distinct slots holding an exam.
    pub slots_used: usize,
    /// Slots in the grid.
    pub total_slots: usize,
    /// Distinct days holding an exam.
    pub days_used: usize,
    /// Largest number of subjects in one slot.
    pub max_exams_per_slot: usize,
    /// Largest number of students seated in one slot.
    pub peak_slot_enrollment: u64,
    /// Fraction of offered seats that were filled (0.0..1.0).
    pub seat_utilization: f64,
    /// Per-hall utilization over the used slots.
    pub utilization_by_hall: HashMap<String, f64>,
}

impl TimetableKpi {
    /// Computes KPIs for a solved timetable.
    ///
    /// Seats are counted only in slots that hold an exam; an empty timetable
    /// has zero utilization.
    pub fn calculate(timetable: &Timetable, allocation: &HallAllocation, halls: &[Hall]) -> Self {
        let by_slot = timetable.by_slot();
        let slots_used = by_slot.len();
        let max_exams_per_slot = by_slot.values().map(Vec::len).max().unwrap_or(0);

        let peak_slot_enrollment = by_slot
            .keys()
            .map(|&slot| {
                allocation
                    .records_for_slot(slot)
                    .iter()
                    .map(|r| u64::from(r.students))
                    .sum::<u64>()
            })
            .max()
            .unwrap_or(0);

        let offered = total_capacity(halls) * slots_used as u64;
        let seat_utilization = ratio(allocation.total_seated(), offered);

        let utilization_by_hall = halls
            .iter()
            .map(|h| {
                let seated: u64 = allocation
                    .records_for_hall(&h.name)
                    .iter()
                    .map(|r| u64::from(r.students))
                    .sum();
                let util = ratio(seated, u64::from(h.capacity) * slots_used as u64);
                (h.name.clone(), util)
            })
            .collect();

        Self {
            slots_used,
            total_slots: timetable.grid.total_slots(),
            days_used: timetable.days_used(),
            max_exams_per_slot,
            peak_slot_enrollment,
            seat_utilization,
            utilization_by_hall,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_days: usize, min_utilization: f64) -> bool {
        self.days_used <= max_days && self.seat_utilization >= min_utilization
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, SeatingRecord, Slot, SlotGrid};

    #[test]
    fn test_kpi_basic() {
        let s0 = Slot::new(0, 0);
        let s1 = Slot::new(1, 1);
        let mut timetable = Timetable::new(SlotGrid::new(2, 2));
        timetable.add_assignment(Assignment::new("Math", s0));
        timetable.add_assignment(Assignment::new("Art", s0));
        timetable.add_assignment(Assignment::new("Physics", s1));

        let mut allocation = HallAllocation::new();
        allocation.add_record(SeatingRecord::new("H1", s0, "Math", 60));
        allocation.add_record(SeatingRecord::new("H2", s0, "Art", 20));
        allocation.add_record(SeatingRecord::new("H1", s1, "Physics", 40));
        let halls = vec![Hall::new("H1", 60), Hall::new("H2", 40)];

        let kpi = TimetableKpi::calculate(&timetable, &allocation, &halls);
        assert_eq!(kpi.slots_used, 2);
        assert_eq!(kpi.total_slots, 4);
        assert_eq!(kpi.days_used, 2);
        assert_eq!(kpi.max_exams_per_slot, 2);
        assert_eq!(kpi.peak_slot_enrollment, 80);
        // 120 seated of 100 × 2 offered
        assert!((kpi.seat_utilization - 0.6).abs() < 1e-10);
        assert!((kpi.utilization_by_hall["H1"] - 100.0 / 120.0).abs() < 1e-10);
        assert!((kpi.utilization_by_hall["H2"] - 0.25).abs() < 1e-10);
        assert!(kpi.meets_thresholds(2, 0.5));
        assert!(!kpi.meets_thresholds(1, 0.5));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(
            &Timetable::new(SlotGrid::new(1, 3)),
            &HallAllocation::new(),
            &[Hall::new("H1", 10)],
        );
        assert_eq!(kpi.slots_used, 0);
        assert_eq!(kpi.max_exams_per_slot, 0);
        assert_eq!(kpi.peak_slot_enrollment, 0);
        assert_eq!(kpi.seat_utilization, 0.0);
        assert_eq!(kpi.utilization_by_hall["H1"], 0.0);
    }
}
