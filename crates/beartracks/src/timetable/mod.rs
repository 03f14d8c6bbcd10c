//! Per-student weekly timetable built from the course and enrollment tables.

mod render;

pub use render::{abbreviate_course, render_timetable, DISPLAY_DAYS, DISPLAY_TIMES};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::catalog::{occupancy_index, open_seats, CourseCatalog};
use crate::records::{DayPattern, Enrollment};

/// Course occupying one (day pattern, time) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub course: String,
    pub open_seats: u32,
}

/// Non-fatal problems found while building a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimetableWarning {
    /// Student is enrolled in a course the catalog no longer lists
    MissingCourseInCatalog { course: String },

    /// Two of the student's courses meet in the same cell; only `course` is shown
    SharedCell {
        pattern: DayPattern,
        time: String,
        course: String,
        hidden: String,
    },
}

impl fmt::Display for TimetableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableWarning::MissingCourseInCatalog { course } => write!(
                f,
                "Course {course} not found in the course catalog. Skipping..."
            ),
            TimetableWarning::SharedCell {
                pattern,
                time,
                course,
                hidden,
            } => write!(
                f,
                "{hidden} and {course} both meet on {pattern} {time}. Showing {course} only."
            ),
        }
    }
}

/// Day pattern -> clock time -> slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timetable {
    days: BTreeMap<DayPattern, BTreeMap<String, Slot>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<TimetableWarning>,
}

impl Timetable {
    pub fn get(&self, pattern: DayPattern, time: &str) -> Option<&Slot> {
        self.days.get(&pattern).and_then(|times| times.get(time))
    }

    /// Places `slot` in its cell, returning whatever occupied it before.
    pub fn insert(&mut self, pattern: DayPattern, time: String, slot: Slot) -> Option<Slot> {
        self.days.entry(pattern).or_default().insert(time, slot)
    }

    /// True when no course occupies any cell.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeMap::is_empty)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn warnings(&self) -> &[TimetableWarning] {
        &self.warnings
    }
}

/// Builds `student`'s timetable from snapshots of the catalog and enrollments.
///
/// Enrollments pointing at courses missing from the catalog are skipped and
/// reported through [`Timetable::warnings`].
pub fn build_timetable(
    student: &str,
    catalog: &CourseCatalog,
    enrollments: &[Enrollment],
) -> Timetable {
    let counts = occupancy_index(enrollments);
    let mut timetable = Timetable::default();

    for enrollment in enrollments.iter().filter(|e| e.student == student) {
        let Some(course) = catalog.get(&enrollment.course) else {
            warn!(
                "Course {} not found in the catalog, skipping it for {}",
                enrollment.course, student
            );
            timetable
                .warnings
                .push(TimetableWarning::MissingCourseInCatalog {
                    course: enrollment.course.clone(),
                });
            continue;
        };

        let taken = counts.get(course.name.as_str()).copied().unwrap_or(0);
        if taken > course.capacity as usize {
            warn!(
                "{} holds {} enrollments against a capacity of {}",
                course.name, taken, course.capacity
            );
        }

        let displaced = timetable.insert(
            course.timeslot.pattern,
            course.timeslot.time.clone(),
            Slot {
                course: course.name.clone(),
                open_seats: open_seats(course.capacity, taken),
            },
        );
        // A repeated row for the same course lands on itself
        if let Some(previous) = displaced.filter(|prev| prev.course != course.name) {
            warn!(
                "{} and {} share {} for {}",
                previous.course, course.name, course.timeslot, student
            );
            timetable.warnings.push(TimetableWarning::SharedCell {
                pattern: course.timeslot.pattern,
                time: course.timeslot.time.clone(),
                course: course.name.clone(),
                hidden: previous.course,
            });
        }
    }

    timetable
}
