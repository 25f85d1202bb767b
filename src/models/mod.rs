//! Timetabling domain models.
//!
//! Provides the data types for describing course sections, the
//! requirement categories a student must satisfy, and the schedules that
//! satisfy them.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Conference | Training |
//! |-------------|-----------|------------|----------|
//! | Section | Lecture/Tutorial section | Session slot | Class cohort |
//! | TimeBlock | One meeting | One talk | One lesson |
//! | RequirementCategory | Course component | Track | Module |
//! | Schedule | Student timetable | Attendee agenda | Trainee plan |

mod requirement;
mod schedule;
mod section;
mod time_block;

pub use requirement::{
    LabelPrefix, LeadingAlphabetic, Requirement, RequirementCategory, Requirements,
    SectionClassifier,
};
pub use schedule::{Schedule, ScheduleEvent};
pub use section::{Section, SectionId, SectionTable};
pub use time_block::TimeBlock;
