//! Course timetabling for the U-Engine ecosystem.
//!
//! Computes every conflict-free timetable for a student who must pick one
//! section of each course component (lecture, tutorial, lab, ...). The
//! problem is encoded as boolean satisfiability and solved by enumerating
//! all models.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeBlock`, `Section`, `SectionTable`,
//!   `RequirementCategory`, `Requirements`, `Schedule`
//! - **`validation`**: Input integrity checks (malformed blocks, duplicate sections)
//! - **`conflict`**: Pairwise section overlap detection
//! - **`cnf`**: Variable registry and CNF constraint encoding
//! - **`solver`**: Model enumeration capability and the `varisat` backend
//! - **`scheduler`**: Schedule enumeration and the end-to-end pipeline
//! - **`config`**: Scheduler configuration (code or TOML)
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::models::SectionTable;
//! use u_timetable::scheduler::TimetableScheduler;
//!
//! let table = SectionTable::from_entries(vec![
//!     (("CS246", "LEC 001"), vec![]),
//!     (("CS246", "LEC 002"), vec![]),
//!     (("CS246", "TUT 101"), vec![]),
//! ]).unwrap();
//!
//! let report = TimetableScheduler::new().compute_schedules(&table).unwrap();
//! assert_eq!(report.len(), 2);
//! ```
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem.
//! Fetching registrar data, expanding weekly meeting patterns into concrete
//! occurrences, and HTTP/JSON presentation belong to the callers.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Biere et al. (2009), "Handbook of Satisfiability"

pub mod cnf;
pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use error::{Result, ScheduleError};
