//! Flat CSV views of a solution.
//!
//! Day and slot columns are one-based.

use std::io::Write;

use csv::Writer;

use crate::error::ExportError;
use crate::models::{HallAllocation, Timetable};

const ALLOCATION_HEADER: [&str; 5] = ["Hall", "Day", "Slot", "Subject", "Students"];
const TIMETABLE_HEADER: [&str; 3] = ["Day", "Slot", "Subject"];

/// Writes one row per seating record, in record order.
pub fn write_allocation_csv<W: Write>(
    allocation: &HallAllocation,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(ALLOCATION_HEADER)?;
    for r in &allocation.records {
        wtr.write_record([
            r.hall.clone(),
            r.slot.day_number().to_string(),
            r.slot.period_number().to_string(),
            r.subject.clone(),
            r.students.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Allocation table as a string.
pub fn allocation_csv(allocation: &HallAllocation) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_allocation_csv(allocation, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes one row per subject, ordered by slot.
pub fn write_timetable_csv<W: Write>(timetable: &Timetable, writer: W) -> Result<(), ExportError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(TIMETABLE_HEADER)?;
    for (slot, subjects) in timetable.by_slot() {
        let day = slot.day_number().to_string();
        let period = slot.period_number().to_string();
        for subject in subjects {
            wtr.write_record([day.as_str(), period.as_str(), subject])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Timetable table as a string.
pub fn timetable_csv(timetable: &Timetable) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_timetable_csv(timetable, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
