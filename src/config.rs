//! Scheduler configuration.
//!
//! Configuration can be built in code with the `with_*` methods or loaded
//! from TOML. Every field has a default, so an empty document is valid.
//!
//! ```
//! use u_timetable::config::{ClassifierConfig, SchedulerConfig};
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     limit = 100
//!     max_courses = 8
//!
//!     [classifier]
//!     kind = "leading_alphabetic"
//! "#).unwrap();
//! assert_eq!(config.limit, 100);
//! assert_eq!(config.classifier, ClassifierConfig::LeadingAlphabetic);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{LabelPrefix, LeadingAlphabetic, SectionClassifier};

/// Default cap on schedules produced per run.
pub const DEFAULT_LIMIT: usize = 500;

/// Settings for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum schedules to produce.
    pub limit: usize,
    /// Maximum distinct courses accepted; `None` = unbounded.
    pub max_courses: Option<usize>,
    /// Instruction-type classification policy.
    pub classifier: ClassifierConfig,
    /// Check category pairs on the rayon pool (requires the `parallel` feature).
    pub parallel_conflicts: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_courses: None,
            classifier: ClassifierConfig::default(),
            parallel_conflicts: false,
        }
    }
}

impl SchedulerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Sets the schedule limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the course cap.
    pub fn with_max_courses(mut self, max_courses: usize) -> Self {
        self.max_courses = Some(max_courses);
        self
    }

    /// Sets the classification policy.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enables parallel conflict detection.
    pub fn with_parallel_conflicts(mut self, enabled: bool) -> Self {
        self.parallel_conflicts = enabled;
        self
    }
}

/// Built-in classification policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierConfig {
    /// First `length` characters of the section label.
    Prefix {
        /// Prefix length in characters.
        length: usize,
    },
    /// Leading alphabetic run of the section label.
    LeadingAlphabetic,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig::Prefix { length: 3 }
    }
}

impl ClassifierConfig {
    /// Materializes the policy.
    pub fn build(&self) -> Box<dyn SectionClassifier> {
        match self {
            ClassifierConfig::Prefix { length } => Box::new(LabelPrefix::new(*length)),
            ClassifierConfig::LeadingAlphabetic => Box::new(LeadingAlphabetic),
        }
    }
}
