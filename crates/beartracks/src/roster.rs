//! Rules for adding students to and removing them from the roster.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::RegistrarError;
use crate::records::Student;

/// Faculties accepted when no configuration overrides them.
pub const DEFAULT_FACULTIES: [&str; 5] = ["BUS", "EDU", "ART", "SCI", "ENG"];

static STUDENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("student id pattern"));

/// Roster settings taken from the app configuration.
#[derive(Debug, Clone)]
pub struct RosterPolicy {
    faculties: Vec<String>,
}

impl RosterPolicy {
    pub fn new<I, S>(faculties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            faculties: faculties
                .into_iter()
                .map(|f| f.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn faculties(&self) -> &[String] {
        &self.faculties
    }

    /// Checks a new student against the roster and returns the row to append.
    ///
    /// The faculty is matched case-insensitively and stored uppercase.
    pub fn admit(
        &self,
        id: &str,
        faculty: &str,
        name: &str,
        roster: &[Student],
    ) -> Result<Student, RegistrarError> {
        let id = id.trim();
        if !is_valid_student_id(id) {
            return Err(RegistrarError::InvalidStudentId {
                student: id.to_string(),
            });
        }

        if roster.iter().any(|s| s.id == id) {
            return Err(RegistrarError::DuplicateStudent {
                student: id.to_string(),
            });
        }

        let faculty = faculty.trim().to_uppercase();
        if !self.faculties.contains(&faculty) {
            return Err(RegistrarError::UnknownFaculty { faculty });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrarError::InvalidName {
                reason: "name is empty".to_string(),
            });
        }
        if name.contains(|c: char| c == '\n' || c == '\r') {
            return Err(RegistrarError::InvalidName {
                reason: "name must fit on one line".to_string(),
            });
        }

        Ok(Student {
            id: id.to_string(),
            faculty,
            name: name.to_string(),
        })
    }
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FACULTIES)
    }
}

/// Newly issued student ids are exactly six ASCII digits.
pub fn is_valid_student_id(id: &str) -> bool {
    STUDENT_ID_REGEX.is_match(id)
}

/// Looks up a student by id.
pub fn find_student<'a>(id: &str, roster: &'a [Student]) -> Result<&'a Student, RegistrarError> {
    roster
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| RegistrarError::UnknownStudent {
            student: id.to_string(),
        })
}
