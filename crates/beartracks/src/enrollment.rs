//! Enrollment validation and the commit/drop decisions built on it.
//!
//! Everything here is a pure decision over snapshots; the registrar applies
//! the outcome to the store.

use crate::catalog::{occupancy, CourseCatalog};
use crate::error::RegistrarError;
use crate::records::{Course, Enrollment};
use crate::timetable::Timetable;

/// Decides whether `course` may be added to a student's `timetable`.
///
/// Checks run in order and stop at the first failure:
/// 1. the course exists in the catalog
/// 2. the student has nothing in the course's exact (day pattern, time) cell
/// 3. the course still has an open seat
///
/// Conflicts are exact-cell matches only; two courses that start at different
/// times are never reported even if their meetings overlap.
///
/// Duplicate enrollment is checked separately with [`is_already_enrolled`].
pub fn validate_enrollment<'a>(
    course: &str,
    catalog: &'a CourseCatalog,
    timetable: &Timetable,
    enrollments: &[Enrollment],
) -> Result<&'a Course, RegistrarError> {
    let details = catalog
        .get(course)
        .ok_or_else(|| RegistrarError::UnknownCourse {
            course: course.to_string(),
        })?;

    let slot = &details.timeslot;
    if let Some(existing) = timetable.get(slot.pattern, &slot.time) {
        return Err(RegistrarError::ScheduleConflict {
            course: course.to_string(),
            pattern: slot.pattern,
            time: slot.time.clone(),
            existing: existing.course.clone(),
        });
    }

    if occupancy(course, enrollments) >= details.capacity as usize {
        return Err(RegistrarError::AtCapacity {
            course: course.to_string(),
            capacity: details.capacity,
        });
    }

    Ok(details)
}

/// True if `student` already holds a row for `course`.
pub fn is_already_enrolled(student: &str, course: &str, enrollments: &[Enrollment]) -> bool {
    enrollments.iter().any(|e| e.matches(student, course))
}

/// The row to append once an enrollment has been validated.
pub fn new_enrollment(student: &str, course: &Course) -> Enrollment {
    Enrollment::new(course.name.as_str(), student)
}

/// Finds the rows a drop must remove, or `NotEnrolled` if there are none.
pub fn plan_drop(
    student: &str,
    course: &str,
    enrollments: &[Enrollment],
) -> Result<Vec<Enrollment>, RegistrarError> {
    let matching: Vec<Enrollment> = enrollments
        .iter()
        .filter(|e| e.matches(student, course))
        .cloned()
        .collect();

    if matching.is_empty() {
        return Err(RegistrarError::NotEnrolled {
            student: student.to_string(),
            course: course.to_string(),
        });
    }
    Ok(matching)
}
