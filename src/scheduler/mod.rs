//! Schedule enumeration and the end-to-end scheduler.
//!
//! # Algorithm
//!
//! `TimetableScheduler` encodes the timetabling problem as CNF and drives a
//! satisfiability backend to enumerate every satisfying assignment, each of
//! which decodes to one conflict-free schedule. Enumeration is lazy and
//! capped; an unsatisfiable problem yields zero schedules, not an error.
//!
//! # Reporting
//!
//! `ScheduleReport` carries the schedules together with the conflict list
//! and the possibility space, for "N schedules found out of M" summaries.
//!
//! # References
//!
//! - Biere et al. (2009), "Handbook of Satisfiability"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod enumerate;
mod report;
mod timetable;

pub use enumerate::{decode_model, enumerate_schedules, ScheduleEnumerator};
pub use report::ScheduleReport;
pub use timetable::{SchedulingProblem, TimetableScheduler};
