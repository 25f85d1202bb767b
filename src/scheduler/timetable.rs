//! End-to-end timetable scheduler.
//!
//! # Pipeline
//!
//! 1. Group sections into requirement categories (classifier policy).
//! 2. Detect conflicts between sections of different categories.
//! 3. Encode exactly-one per category and at-most-one per conflict as CNF.
//! 4. Enumerate models with the configured backend, decoding each into a
//!    schedule, up to the configured limit.
//!
//! Every run builds its own registry and formula; nothing is shared between
//! runs, so one scheduler can serve concurrent requests.

use std::collections::HashSet;
use std::fmt;

use super::{enumerate_schedules, ScheduleEnumerator, ScheduleReport};
use crate::cnf::{CnfFormula, ConstraintBuilder, VariableRegistry};
use crate::config::SchedulerConfig;
use crate::conflict::{find_conflicts, Conflict};
use crate::error::{Result, ScheduleError};
use crate::models::{Requirements, SectionClassifier, SectionId, SectionTable};
use crate::solver::{ModelSource, VarisatSource};

/// The encoded problem for one run, before enumeration.
#[derive(Debug, Clone)]
pub struct SchedulingProblem {
    /// Requirement categories.
    pub requirements: Requirements,
    /// Cross-category conflicts.
    pub conflicts: Vec<Conflict>,
    /// CNF encoding.
    pub formula: CnfFormula,
    /// Variable space of `formula`.
    pub registry: VariableRegistry,
}

impl SchedulingProblem {
    /// Encodes requirements and conflicts.
    ///
    /// Conflicts naming a section outside every requirement are dropped:
    /// such a section can never be selected, so the pair excludes nothing.
    pub fn new(requirements: Requirements, mut conflicts: Vec<Conflict>) -> Self {
        let required: HashSet<&SectionId> =
            requirements.iter().flat_map(|r| r.sections.iter()).collect();
        conflicts.retain(|c| {
            let keep = required.contains(&c.first) && required.contains(&c.second);
            if !keep {
                log::debug!(
                    "ignoring conflict {} / {}: section not in any requirement",
                    c.first,
                    c.second
                );
            }
            keep
        });

        let (formula, registry) =
            ConstraintBuilder::from_parts(requirements.iter(), conflicts.iter()).build();
        log::debug!(
            "encoded {} categories and {} conflicts as {} clauses over {} variables",
            requirements.len(),
            conflicts.len(),
            formula.len(),
            registry.len()
        );
        Self {
            requirements,
            conflicts,
            formula,
            registry,
        }
    }
}

/// Computes every conflict-free timetable for a set of sections.
///
/// # Example
///
/// ```
/// use u_timetable::models::SectionTable;
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let hour = 3_600_000;
/// let table = SectionTable::from_entries(vec![
///     (("CS246", "LEC 001"), vec![(9 * hour, 10 * hour)]),
///     (("CS246", "LEC 002"), vec![(13 * hour, 14 * hour)]),
///     (("CS246", "TUT 101"), vec![(9 * hour, 10 * hour)]),
/// ]).unwrap();
///
/// let report = TimetableScheduler::new().compute_schedules(&table).unwrap();
/// assert_eq!(report.len(), 1); // LEC 002 + TUT 101
/// assert_eq!(report.possibility_space, 2);
/// ```
pub struct TimetableScheduler<S = VarisatSource> {
    config: SchedulerConfig,
    classifier: Box<dyn SectionClassifier>,
    source: S,
}

impl TimetableScheduler<VarisatSource> {
    /// Creates a scheduler with default configuration and the varisat backend.
    pub fn new() -> Self {
        Self::from_config(SchedulerConfig::default())
    }

    /// Creates a scheduler from configuration.
    pub fn from_config(config: SchedulerConfig) -> Self {
        let classifier = config.classifier.build();
        Self {
            config,
            classifier,
            source: VarisatSource,
        }
    }
}

impl Default for TimetableScheduler<VarisatSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for TimetableScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimetableScheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: ModelSource> TimetableScheduler<S> {
    /// Replaces the satisfiability backend.
    pub fn with_source<T: ModelSource>(self, source: T) -> TimetableScheduler<T> {
        TimetableScheduler {
            config: self.config,
            classifier: self.classifier,
            source,
        }
    }

    /// Replaces the classification policy with a custom one.
    pub fn with_classifier(mut self, classifier: impl SectionClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Sets the schedule limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Groups, checks, and encodes `table` without solving.
    ///
    /// # Errors
    /// [`ScheduleError::TooManyCourses`] if the table exceeds `max_courses`.
    pub fn prepare(&self, table: &SectionTable) -> Result<SchedulingProblem> {
        if let Some(max) = self.config.max_courses {
            let count = table.course_ids().len();
            if count > max {
                return Err(ScheduleError::TooManyCourses { count, max });
            }
        }

        let requirements = Requirements::group(table, self.classifier.as_ref());

        log::info!("generating conflict constraints");
        let conflicts = self.detect_conflicts(&requirements, table);
        log::info!("{} conflicting section pairs", conflicts.len());

        Ok(SchedulingProblem::new(requirements, conflicts))
    }

    fn detect_conflicts(&self, requirements: &Requirements, table: &SectionTable) -> Vec<Conflict> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel_conflicts {
                return crate::conflict::find_conflicts_parallel(requirements, table);
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            if self.config.parallel_conflicts {
                log::debug!("parallel conflict detection requested without the `parallel` feature");
            }
        }
        find_conflicts(requirements, table)
    }

    /// Lazily enumerates schedules for `table`.
    ///
    /// The caller may stop pulling at any time; dropping the iterator
    /// releases the solver.
    pub fn schedules(&self, table: &SectionTable) -> Result<ScheduleEnumerator<S::Models>> {
        let problem = self.prepare(table)?;
        Ok(enumerate_schedules(
            &problem.formula,
            problem.registry,
            &self.source,
            self.config.limit,
        ))
    }

    /// Computes schedules for `table` and collects them into a report.
    pub fn compute_schedules(&self, table: &SectionTable) -> Result<ScheduleReport> {
        let problem = self.prepare(table)?;
        self.solve(problem)
    }

    /// Computes schedules for explicit requirements and declared conflicts.
    ///
    /// Useful when conflicts come from a source other than meeting times.
    /// Only sections listed in `requirements` can appear in a schedule;
    /// conflicts involving any other section are ignored.
    pub fn compute_from_parts(
        &self,
        requirements: Requirements,
        conflicts: Vec<Conflict>,
    ) -> Result<ScheduleReport> {
        self.solve(SchedulingProblem::new(requirements, conflicts))
    }

    /// Enumerates schedules for a prepared problem.
    pub fn solve(&self, problem: SchedulingProblem) -> Result<ScheduleReport> {
        let SchedulingProblem {
            requirements,
            conflicts,
            formula,
            registry,
        } = problem;

        log::info!("solving for schedules");
        let mut enumerator =
            enumerate_schedules(&formula, registry, &self.source, self.config.limit);
        let schedules = enumerator.by_ref().collect::<Result<Vec<_>>>()?;
        let truncated = enumerator.truncated()?;

        let report = ScheduleReport {
            schedules,
            conflicts,
            possibility_space: requirements.possibility_space(),
            truncated,
        };

        if truncated {
            log::warn!(
                "stopped at the limit of {} schedules; more exist",
                self.config.limit
            );
        }
        log::info!("{}", report.summary());

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use crate::models::RequirementCategory;

    const HOUR: i64 = 3_600_000;

    fn sample_table() -> SectionTable {
        SectionTable::from_entries(vec![
            (("CS240", "LEC 001"), vec![(13 * HOUR, 14 * HOUR)]),
            (("CS240", "LEC 002"), vec![(11 * HOUR, 12 * HOUR)]),
            (("ECON201", "LEC 001"), vec![(13 * HOUR, 14 * HOUR)]),
            (("ECON201", "LEC 002"), vec![(15 * HOUR, 16 * HOUR)]),
            (("CS240", "TUT 101"), vec![(11 * HOUR, 12 * HOUR)]),
            (("CS240", "TUT 102"), vec![(16 * HOUR, 17 * HOUR)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_prepare_groups_and_detects() {
        let scheduler = TimetableScheduler::new();
        let problem = scheduler.prepare(&sample_table()).unwrap();

        assert_eq!(problem.requirements.len(), 3);
        // CS240 LEC 001 × ECON201 LEC 001, CS240 LEC 002 × CS240 TUT 101
        assert_eq!(problem.conflicts.len(), 2);
        assert_eq!(problem.registry.len(), 6);
    }

    #[test]
    fn test_compute_schedules() {
        let report = TimetableScheduler::new()
            .compute_schedules(&sample_table())
            .unwrap();

        assert_eq!(report.possibility_space, 8);
        // 8 combinations minus those containing either conflict pair:
        // LEC1+ECON1 (2), LEC2+TUT101 (2) → 4 remain
        assert_eq!(report.len(), 4);
        assert!(!report.truncated);
        for schedule in &report.schedules {
            assert_eq!(schedule.len(), 3);
            for c in &report.conflicts {
                assert!(!(schedule.contains(&c.first) && schedule.contains(&c.second)));
            }
        }
    }

    #[test]
    fn test_limit_applied() {
        let report = TimetableScheduler::new()
            .with_limit(3)
            .compute_schedules(&sample_table())
            .unwrap();
        assert_eq!(report.len(), 3);
        assert!(report.truncated);
    }

    #[test]
    fn test_limit_equal_to_solution_count() {
        let report = TimetableScheduler::new()
            .with_limit(4)
            .compute_schedules(&sample_table())
            .unwrap();
        assert_eq!(report.len(), 4);
        assert!(!report.truncated);
    }

    #[test]
    fn test_too_many_courses() {
        let scheduler =
            TimetableScheduler::from_config(SchedulerConfig::default().with_max_courses(1));
        let err = scheduler.compute_schedules(&sample_table()).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::TooManyCourses { count: 2, max: 1 }
        ));
    }

    #[test]
    fn test_custom_classifier() {
        // Treat every section of a course as one category.
        let scheduler = TimetableScheduler::new().with_classifier(|_: &SectionId| String::new());
        let report = scheduler.compute_schedules(&sample_table()).unwrap();
        // CS240: 4 alternatives, ECON201: 2 alternatives; LEC 001 × ECON LEC 001 conflicts.
        assert_eq!(report.possibility_space, 8);
        assert_eq!(report.len(), 7);
    }

    #[test]
    fn test_config_classifier() {
        let config = SchedulerConfig::default()
            .with_classifier(ClassifierConfig::Prefix { length: 0 });
        let problem = TimetableScheduler::from_config(config)
            .prepare(&sample_table())
            .unwrap();
        assert_eq!(problem.requirements.len(), 2);
    }

    #[test]
    fn test_lazy_schedules() {
        let scheduler = TimetableScheduler::new();
        let mut schedules = scheduler.schedules(&sample_table()).unwrap();
        assert!(schedules.next().unwrap().is_ok());
        assert_eq!(schedules.produced(), 1);
    }

    #[test]
    fn test_conflict_outside_requirements_ignored() {
        let requirements = Requirements::new()
            .with_requirement(RequirementCategory::new("CS246", "LEC"), [("CS246", "LEC 001")]);
        let conflicts = vec![Conflict::new(("X", "LEC 1"), ("Y", "LEC 1"))];

        let report = TimetableScheduler::new()
            .compute_from_parts(requirements, conflicts)
            .unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.conflicts.is_empty());
        let only: Vec<String> = report.schedules[0].iter().map(|s| s.to_string()).collect();
        assert_eq!(only, ["CS246|LEC 001"]);
    }

    #[test]
    fn test_half_stray_conflict_ignored() {
        let requirements = Requirements::new()
            .with_requirement(
                RequirementCategory::new("CS246", "LEC"),
                [("CS246", "LEC 001"), ("CS246", "LEC 002")],
            );
        let conflicts = vec![Conflict::new(("CS246", "LEC 001"), ("X", "LEC 1"))];

        let problem = SchedulingProblem::new(requirements, conflicts);
        assert!(problem.conflicts.is_empty());
        assert_eq!(problem.registry.len(), 2);
    }

    #[test]
    fn test_empty_requirement_yields_no_schedules() {
        let requirements = Requirements::new()
            .with_requirement(RequirementCategory::new("CS246", "LEC"), [("CS246", "LEC 001")])
            .with_requirement(
                RequirementCategory::new("CS246", "LAB"),
                Vec::<SectionId>::new(),
            );
        let report = TimetableScheduler::new()
            .compute_from_parts(requirements, Vec::new())
            .unwrap();
        assert!(report.is_empty());
        assert_eq!(report.possibility_space, 0);
    }
}
