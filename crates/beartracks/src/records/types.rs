/// Record types shared by the store, the timetable and the front ends
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed weekly meeting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayPattern {
    /// Monday, Wednesday, Friday
    #[serde(rename = "MWF")]
    Mwf,
    /// Tuesday, Thursday
    #[serde(rename = "TR")]
    Tr,
}

impl DayPattern {
    /// Derives the pattern from the days token of a timeslot descriptor.
    ///
    /// Anything mentioning `MWF` meets Monday/Wednesday/Friday; everything else
    /// is treated as Tuesday/Thursday.
    pub fn from_days_token(token: &str) -> Self {
        if token.contains("MWF") {
            DayPattern::Mwf
        } else {
            DayPattern::Tr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPattern::Mwf => "MWF",
            DayPattern::Tr => "TR",
        }
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day pattern plus the clock time the course meets at on each of those days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    pub pattern: DayPattern,
    pub time: String,
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pattern, self.time)
    }
}

/// A catalog entry, e.g. `CMPUT 175;MWF 9:00;40;Smith`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub timeslot: Timeslot,
    pub capacity: u32,
    pub lecturer: String,
}

/// A single `COURSE: STUDENT_ID` row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub course: String,
    pub student: String,
}

impl Enrollment {
    pub fn new(course: impl Into<String>, student: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            student: student.into(),
        }
    }

    /// True if this row binds `student` to `course`.
    pub fn matches(&self, student: &str, course: &str) -> bool {
        self.student == student && self.course == course
    }
}

/// A roster entry, e.g. `123456,SCI,Jane Doe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub faculty: String,
    pub name: String,
}
