//! Registrar service: sequences store reads, core decisions and store writes.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::catalog::{occupancy_index, open_seats, CourseCatalog};
use crate::enrollment::{is_already_enrolled, new_enrollment, plan_drop, validate_enrollment};
use crate::error::{RegistrarError, StoreError};
use crate::records::{normalize_course_id, Course, Enrollment, Student};
use crate::roster::{find_student, RosterPolicy};
use crate::store::RecordStore;
use crate::timetable::{build_timetable, Timetable};

/// Result of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentReceipt {
    pub student: Student,
    pub course: Course,
}

/// Result of a successful drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropReceipt {
    pub student: Student,
    pub course: String,
    pub removed: usize,
}

/// Catalog entry with its remaining seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListing {
    #[serde(flatten)]
    pub course: Course,
    pub open_seats: u32,
}

/// Owns the record store and runs each operation under one lock.
///
/// The lock is held from the first read to the last write, so two enrollments
/// can never both see the same last open seat.
pub struct Registrar<S> {
    store: Mutex<S>,
    roster_policy: RosterPolicy,
}

impl<S: RecordStore> Registrar<S> {
    pub fn new(store: S) -> Self {
        Self::with_roster_policy(store, RosterPolicy::default())
    }

    pub fn with_roster_policy(store: S, roster_policy: RosterPolicy) -> Self {
        Self {
            store: Mutex::new(store),
            roster_policy,
        }
    }

    pub fn roster_policy(&self) -> &RosterPolicy {
        &self.roster_policy
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // The store keeps no in-memory invariants a panic could break
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up a student on the roster.
    pub fn student(&self, id: &str) -> Result<Student, RegistrarError> {
        let store = self.lock();
        let roster = store.read_students()?;
        find_student(id.trim(), &roster).cloned()
    }

    /// Catalog listing with open seats per course.
    pub fn course_listing(&self) -> Result<Vec<CourseListing>, RegistrarError> {
        let store = self.lock();
        let catalog = CourseCatalog::new(store.read_courses()?);
        let enrollments = store.read_enrollments()?;
        let taken = occupancy_index(&enrollments);

        Ok(catalog
            .sorted()
            .into_iter()
            .map(|course| CourseListing {
                open_seats: open_seats(
                    course.capacity,
                    taken.get(course.name.as_str()).copied().unwrap_or(0),
                ),
                course: course.clone(),
            })
            .collect())
    }

    /// Builds the student's current timetable.
    pub fn timetable(&self, id: &str) -> Result<(Student, Timetable), RegistrarError> {
        let store = self.lock();
        let id = id.trim();
        let student = find_student(id, &store.read_students()?)?.clone();
        let catalog = CourseCatalog::new(store.read_courses()?);
        let enrollments = store.read_enrollments()?;

        let timetable = build_timetable(id, &catalog, &enrollments);
        debug!("Built timetable for {} with {} slots", id, timetable.len());
        Ok((student, timetable))
    }

    /// Course identifiers the student is enrolled in, sorted.
    pub fn enrolled_courses(&self, id: &str) -> Result<Vec<String>, RegistrarError> {
        let store = self.lock();
        let id = id.trim();
        find_student(id, &store.read_students()?)?;

        let mut courses: Vec<String> = store
            .read_enrollments()?
            .into_iter()
            .filter(|e| e.student == id)
            .map(|e| e.course)
            .collect();
        courses.sort();
        courses.dedup();
        Ok(courses)
    }

    /// Enrolls a student after the duplicate, catalog, conflict and capacity
    /// checks pass.
    pub fn enroll(&self, id: &str, course: &str) -> Result<EnrollmentReceipt, RegistrarError> {
        let mut store = self.lock();
        let id = id.trim();
        let course = normalize_course_id(course);

        let student = find_student(id, &store.read_students()?)?.clone();
        let enrollments = store.read_enrollments()?;

        // Checked before validation: the student's own row would otherwise
        // occupy the cell and read as a schedule conflict.
        if is_already_enrolled(id, &course, &enrollments) {
            info!("{} is already enrolled in {}", id, course);
            return Err(RegistrarError::AlreadyEnrolled {
                student: id.to_string(),
                course,
            });
        }

        let catalog = CourseCatalog::new(store.read_courses()?);
        let timetable = build_timetable(id, &catalog, &enrollments);
        let details = validate_enrollment(&course, &catalog, &timetable, &enrollments)
            .inspect_err(|e| info!("Rejected enrollment of {} in {}: {}", id, course, e))?;

        match store.append_enrollment(&new_enrollment(id, details)) {
            Ok(()) => {}
            Err(StoreError::DuplicateEnrollment { course, student }) => {
                return Err(RegistrarError::AlreadyEnrolled { student, course })
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            "Enrolled {} ({}) in {} on {}",
            student.name, id, details.name, details.timeslot
        );
        Ok(EnrollmentReceipt {
            student,
            course: details.clone(),
        })
    }

    /// Drops every row binding the student to the course.
    pub fn drop_course(&self, id: &str, course: &str) -> Result<DropReceipt, RegistrarError> {
        let mut store = self.lock();
        let id = id.trim();
        let course = normalize_course_id(course);

        let student = find_student(id, &store.read_students()?)?.clone();
        let enrollments = store.read_enrollments()?;
        plan_drop(id, &course, &enrollments)?;

        let removed = store.remove_enrollments(&|e: &Enrollment| e.matches(id, &course))?;
        info!("{} ({}) dropped {}", student.name, id, course);
        Ok(DropReceipt {
            student,
            course,
            removed,
        })
    }

    /// Adds a new student to the roster.
    pub fn add_student(
        &self,
        id: &str,
        faculty: &str,
        name: &str,
    ) -> Result<Student, RegistrarError> {
        let mut store = self.lock();
        let roster = store.read_students()?;
        let student = self.roster_policy.admit(id, faculty, name, &roster)?;

        store.append_student(&student)?;
        info!("Added student {} ({}) to {}", student.name, student.id, student.faculty);
        Ok(student)
    }

    /// Removes a student from the roster.
    ///
    /// Their enrollment rows are left in place.
    pub fn remove_student(&self, id: &str) -> Result<Student, RegistrarError> {
        let mut store = self.lock();
        let id = id.trim();
        let student = find_student(id, &store.read_students()?)?.clone();

        store.remove_students(&|s: &Student| s.id == id)?;
        info!("Removed student {} ({})", student.name, id);
        Ok(student)
    }
}
