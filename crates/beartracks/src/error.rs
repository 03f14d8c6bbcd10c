//! Error types for the enrollment subsystem.

use std::path::Path;

use thiserror::Error;

use crate::records::DayPattern;

/// Errors raised while parsing a single record line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The line did not split into the expected number of fields
    #[error("expected {expected} fields separated by '{separator}', found {found}")]
    FieldCount {
        expected: usize,
        found: usize,
        separator: char,
    },

    /// A required field was present but empty
    #[error("missing {field}")]
    MissingField { field: &'static str },

    /// Timeslot descriptor without both a day pattern and a time
    #[error("timeslot '{value}' must be a day pattern followed by a time")]
    Timeslot { value: String },

    /// Capacity was not a positive integer
    #[error("capacity '{value}' is not a positive integer")]
    Capacity { value: String },
}

/// Errors that can occur while reading or writing the record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading or writing a backing file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A line in a backing file could not be parsed
    #[error("Malformed record in {path} at line {line}: {source}")]
    Malformed {
        path: String,
        line: usize,
        source: RecordParseError,
    },

    /// The (course, student) pair is already stored
    #[error("{student} is already recorded in {course}")]
    DuplicateEnrollment { course: String, student: String },
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors returned by registrar operations.
///
/// Every variant is recoverable: front ends report it and return to the caller
/// for another attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrarError {
    /// Course identifier is not in the catalog
    #[error("Invalid course name: {course}")]
    UnknownCourse { course: String },

    /// Student already holds a course in the same (day pattern, time) cell
    #[error("Schedule conflict: already registered for course on {pattern} {time}.")]
    ScheduleConflict {
        course: String,
        pattern: DayPattern,
        time: String,
        existing: String,
    },

    /// Course has no open seats left
    #[error("Cannot enroll. {course} is already at capacity. Please contact advisor to get on waiting list.")]
    AtCapacity { course: String, capacity: u32 },

    /// Student already holds an enrollment in the course
    #[error("{student} is already enrolled in {course}.")]
    AlreadyEnrolled { student: String, course: String },

    /// Student holds no enrollment in the course being dropped
    #[error("Drop failed. {student} is not currently registered in {course}.")]
    NotEnrolled { student: String, course: String },

    /// Student identifier is not on the roster
    #[error("Invalid student ID: {student}")]
    UnknownStudent { student: String },

    /// New student identifier is not six digits
    #[error("Invalid student ID '{student}'. Please enter a 6-digit number.")]
    InvalidStudentId { student: String },

    /// Faculty tag is not one of the configured faculties
    #[error("Unknown faculty '{faculty}'")]
    UnknownFaculty { faculty: String },

    /// New student identifier is already on the roster
    #[error("Student ID {student} already exists. Please enter a unique ID.")]
    DuplicateStudent { student: String },

    /// Student name is empty or cannot be stored on one line
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// The record store failed underneath the operation
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistrarError {
    /// Returns true if this error is a business-rule rejection rather than a
    /// lookup miss, an input problem or a store failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RegistrarError::ScheduleConflict { .. }
                | RegistrarError::AtCapacity { .. }
                | RegistrarError::AlreadyEnrolled { .. }
                | RegistrarError::NotEnrolled { .. }
                | RegistrarError::DuplicateStudent { .. }
        )
    }

    /// Returns true if the referenced course or student does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistrarError::UnknownCourse { .. } | RegistrarError::UnknownStudent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_the_cell() {
        let err = RegistrarError::ScheduleConflict {
            course: "MATH 125".to_string(),
            pattern: DayPattern::Mwf,
            time: "9:00".to_string(),
            existing: "CMPUT 175".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schedule conflict: already registered for course on MWF 9:00."
        );
        assert!(err.is_rejection());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_store_errors_are_neither_rejections_nor_misses() {
        let err = RegistrarError::from(StoreError::Io {
            path: "courses.txt".to_string(),
            message: "denied".to_string(),
        });
        assert!(!err.is_rejection());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("courses.txt"));
    }
}
