//! Indexed course lookup and seat accounting.

use std::collections::HashMap;

use crate::records::{Course, Enrollment};

/// Course identifier -> course, built once per operation from the course table.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: HashMap<String, Course>,
}

impl CourseCatalog {
    /// Indexes `courses`; when an identifier repeats, the later entry wins.
    pub fn new(courses: Vec<Course>) -> Self {
        let courses = courses
            .into_iter()
            .map(|course| (course.name.clone(), course))
            .collect();
        Self { courses }
    }

    pub fn get(&self, name: &str) -> Option<&Course> {
        self.courses.get(name)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses sorted by identifier.
    pub fn sorted(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.values().collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name));
        courses
    }
}

impl FromIterator<Course> for CourseCatalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Number of enrollment rows for `course`.
pub fn occupancy(course: &str, enrollments: &[Enrollment]) -> usize {
    enrollments.iter().filter(|e| e.course == course).count()
}

/// Occupancy of every course that has at least one row, in a single pass.
pub fn occupancy_index(enrollments: &[Enrollment]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for enrollment in enrollments {
        *counts.entry(enrollment.course.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Capacity minus occupancy, clamped at zero when a course is over-full.
pub fn open_seats(capacity: u32, taken: usize) -> u32 {
    let taken = u32::try_from(taken).unwrap_or(u32::MAX);
    capacity.saturating_sub(taken)
}
