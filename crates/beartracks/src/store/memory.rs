use super::RecordStore;
use crate::error::{RecordParseError, StoreError};
use crate::records::{Course, Enrollment, Student};

/// In-memory record store, mainly for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    students: Vec<Student>,
}

impl MemoryStore {
    pub fn new(courses: Vec<Course>, enrollments: Vec<Enrollment>, students: Vec<Student>) -> Self {
        Self {
            courses,
            enrollments,
            students,
        }
    }

    /// Builds a store from the same line formats the flat files use.
    pub fn from_lines(
        courses: &[&str],
        enrollments: &[&str],
        students: &[&str],
    ) -> Result<Self, RecordParseError> {
        Ok(Self {
            courses: courses
                .iter()
                .map(|line| line.parse::<Course>())
                .collect::<Result<Vec<_>, _>>()?,
            enrollments: enrollments
                .iter()
                .filter_map(|line| Enrollment::parse_line(line))
                .collect(),
            students: students
                .iter()
                .map(|line| line.parse::<Student>())
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl RecordStore for MemoryStore {
    fn read_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.clone())
    }

    fn read_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.enrollments.clone())
    }

    fn read_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.students.clone())
    }

    fn append_enrollment(&mut self, enrollment: &Enrollment) -> Result<(), StoreError> {
        if self.enrollments.contains(enrollment) {
            return Err(StoreError::DuplicateEnrollment {
                course: enrollment.course.clone(),
                student: enrollment.student.clone(),
            });
        }
        self.enrollments.push(enrollment.clone());
        Ok(())
    }

    fn remove_enrollments(
        &mut self,
        predicate: &dyn Fn(&Enrollment) -> bool,
    ) -> Result<usize, StoreError> {
        let before = self.enrollments.len();
        self.enrollments.retain(|e| !predicate(e));
        Ok(before - self.enrollments.len())
    }

    fn append_student(&mut self, student: &Student) -> Result<(), StoreError> {
        self.students.push(student.clone());
        Ok(())
    }

    fn remove_students(
        &mut self,
        predicate: &dyn Fn(&Student) -> bool,
    ) -> Result<usize, StoreError> {
        let before = self.students.len();
        self.students.retain(|s| !predicate(s));
        Ok(before - self.students.len())
    }
}
