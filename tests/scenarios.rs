//! End-to-end scheduling scenarios.

use std::collections::HashSet;

use u_timetable::conflict::{blocks_conflict, Conflict};
use u_timetable::models::{
    LabelPrefix, RequirementCategory, Requirements, Schedule, SectionId, SectionTable, TimeBlock,
};
use u_timetable::scheduler::TimetableScheduler;

const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;

fn course_components(course: &str) -> Vec<((String, String), Vec<(i64, i64)>)> {
    ["LEC 001", "LEC 002", "LEC 003", "TUT 001", "TUT 002", "TUT 003"]
        .iter()
        .map(|label| ((course.to_string(), label.to_string()), Vec::new()))
        .collect()
}

fn requirement(course: &str, kind: &str) -> (RequirementCategory, Vec<SectionId>) {
    let sections = (1..=3)
        .map(|i| SectionId::new(course, format!("{kind} 00{i}")))
        .collect();
    (RequirementCategory::new(course, kind), sections)
}

fn two_course_requirements() -> Requirements {
    let mut requirements = Requirements::new();
    for course in ["CS246", "CS245"] {
        for kind in ["LEC", "TUT"] {
            let (category, sections) = requirement(course, kind);
            requirements.add_requirement(category, sections);
        }
    }
    requirements
}

#[test]
fn test_single_course_without_meetings() {
    let table = SectionTable::from_entries(course_components("CS246")).unwrap();
    let report = TimetableScheduler::new().compute_schedules(&table).unwrap();

    assert_eq!(report.len(), 9);
    assert_eq!(report.possibility_space, 9);
    assert!(report.conflicts.is_empty());

    let distinct: HashSet<&Schedule> = report.schedules.iter().collect();
    assert_eq!(distinct.len(), 9);
    for schedule in &report.schedules {
        let labels: Vec<&str> = schedule.iter().map(|s| &s.section_label[..3]).collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&"LEC"));
        assert!(labels.contains(&"TUT"));
    }
}

#[test]
fn test_declared_conflict_removes_combinations() {
    let conflict = Conflict::new(("CS245", "LEC 001"), ("CS246", "LEC 003"));
    let report = TimetableScheduler::new()
        .compute_from_parts(two_course_requirements(), vec![conflict.clone()])
        .unwrap();

    assert_eq!(report.possibility_space, 81);
    assert_eq!(report.len(), 72);
    assert!(report
        .schedules
        .iter()
        .all(|s| !(s.contains(&conflict.first) && s.contains(&conflict.second))));
}

#[test]
fn test_empty_category_is_unsatisfiable() {
    let mut requirements = two_course_requirements();
    requirements.add_requirement(
        RequirementCategory::new("CS246", "LAB"),
        Vec::<SectionId>::new(),
    );

    let report = TimetableScheduler::new()
        .compute_from_parts(requirements, Vec::new())
        .unwrap();
    assert!(report.is_empty());
    assert_eq!(report.possibility_space, 0);
    assert_eq!(report.summary(), "0 valid schedules found out of 0 possibilities");
}

#[test]
fn test_adjacent_and_overlapping_meetings() {
    let lec = [TimeBlock::new(11 * HOUR + 30 * MINUTE, 12 * HOUR + 50 * MINUTE)];
    let adjacent = [TimeBlock::new(13 * HOUR, 14 * HOUR + 20 * MINUTE)];
    let overlapping = [TimeBlock::new(12 * HOUR, 13 * HOUR)];

    assert!(!blocks_conflict(&lec, &adjacent));
    assert!(blocks_conflict(&lec, &overlapping));
}

#[test]
fn test_zero_limit_yields_nothing() {
    let table = SectionTable::from_entries(course_components("CS246")).unwrap();
    let scheduler = TimetableScheduler::new().with_limit(0);

    let report = scheduler.compute_schedules(&table).unwrap();
    assert!(report.is_empty());
    assert!(report.truncated);
    assert_eq!(scheduler.schedules(&table).unwrap().count(), 0);
}

#[test]
fn test_limit_caps_large_space() {
    let table = SectionTable::from_entries(
        course_components("CS246")
            .into_iter()
            .chain(course_components("CS245")),
    )
    .unwrap();

    let report = TimetableScheduler::new()
        .with_limit(10)
        .compute_schedules(&table)
        .unwrap();
    assert_eq!(report.len(), 10);
    assert!(report.truncated);
    assert_eq!(report.possibility_space, 81);
}

#[test]
fn test_meeting_times_drive_conflicts() {
    // Tuesday/Thursday lectures of two courses; CS240 LEC 001 and
    // ECON201 LEC 001 meet at the same time.
    let day = 24 * HOUR;
    let tue_thu = |hour: i64, minute: i64| {
        let start = hour * HOUR + minute * MINUTE;
        vec![
            (day + start, day + start + 80 * MINUTE),
            (3 * day + start, 3 * day + start + 80 * MINUTE),
        ]
    };
    let table = SectionTable::from_entries(vec![
        (("CS240", "LEC 001"), tue_thu(13, 0)),
        (("CS240", "LEC 002"), tue_thu(11, 30)),
        (("ECON201", "LEC 001"), tue_thu(13, 0)),
        (("ECON201", "LEC 002"), tue_thu(14, 30)),
        (("CS240", "TST 201"), vec![]),
    ])
    .unwrap();

    let report = TimetableScheduler::new().compute_schedules(&table).unwrap();
    assert_eq!(
        report.conflicts,
        vec![Conflict::new(("CS240", "LEC 001"), ("ECON201", "LEC 001"))]
    );
    assert_eq!(report.possibility_space, 4);
    assert_eq!(report.len(), 3);

    let requirements = Requirements::group(&table, &LabelPrefix::default());
    for schedule in &report.schedules {
        for requirement in requirements.iter() {
            let picked = requirement
                .sections
                .iter()
                .filter(|s| schedule.contains(s))
                .count();
            assert_eq!(picked, 1, "{} picked {} times", requirement.category, picked);
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let table = SectionTable::from_entries(
        course_components("CS246")
            .into_iter()
            .chain(course_components("CS245")),
    )
    .unwrap();
    let scheduler = TimetableScheduler::new();

    let first = scheduler.compute_schedules(&table).unwrap();
    let second = scheduler.compute_schedules(&table).unwrap();
    let mut a = first.schedules;
    let mut b = second.schedules;
    a.sort();
    b.sort();
    assert_eq!(a, b);
}
