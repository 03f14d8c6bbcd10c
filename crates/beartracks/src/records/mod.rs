//! Typed records for the three flat tables and their line formats.
//!
//! Courses and students parse strictly: a line missing a required field is an
//! error. Enrollment lines without a colon are skipped, which keeps blank and
//! stray lines in hand-edited files harmless.

mod types;

pub use types::{Course, DayPattern, Enrollment, Student, Timeslot};

use std::str::FromStr;

use crate::error::RecordParseError;

const COURSE_SEPARATOR: char = ';';
const ENROLLMENT_SEPARATOR: char = ':';
const STUDENT_SEPARATOR: char = ',';

/// Normalizes a course identifier typed by a user (`cmput 175 ` -> `CMPUT 175`).
pub fn normalize_course_id(input: &str) -> String {
    input.trim().to_uppercase()
}

impl FromStr for Timeslot {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(days), Some(time)) => Ok(Timeslot {
                pattern: DayPattern::from_days_token(days),
                time: time.to_string(),
            }),
            _ => Err(RecordParseError::Timeslot {
                value: s.trim().to_string(),
            }),
        }
    }
}

impl FromStr for Course {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(COURSE_SEPARATOR).map(str::trim).collect();
        if fields.len() != 4 {
            return Err(RecordParseError::FieldCount {
                expected: 4,
                found: fields.len(),
                separator: COURSE_SEPARATOR,
            });
        }

        let name = required(fields[0], "course name")?;
        let timeslot = fields[1].parse::<Timeslot>()?;
        let capacity = fields[2]
            .parse::<u32>()
            .ok()
            .filter(|&c| c > 0)
            .ok_or_else(|| RecordParseError::Capacity {
                value: fields[2].to_string(),
            })?;

        Ok(Course {
            name: name.to_string(),
            timeslot,
            capacity,
            lecturer: fields[3].to_string(),
        })
    }
}

impl Enrollment {
    /// Parses a `COURSE: STUDENT_ID` line.
    ///
    /// Returns `None` for lines without a colon or with an empty side.
    pub fn parse_line(line: &str) -> Option<Enrollment> {
        let (course, student) = line.split_once(ENROLLMENT_SEPARATOR)?;
        let (course, student) = (course.trim(), student.trim());
        if course.is_empty() || student.is_empty() {
            return None;
        }
        Some(Enrollment::new(course, student))
    }

    pub fn to_line(&self) -> String {
        format!("{}{} {}", self.course, ENROLLMENT_SEPARATOR, self.student)
    }
}

impl FromStr for Student {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.trim().splitn(3, STUDENT_SEPARATOR);
        let (id, faculty, name) = match (fields.next(), fields.next(), fields.next()) {
            (Some(id), Some(faculty), Some(name)) => (id, faculty, name),
            (id, faculty, _) => {
                return Err(RecordParseError::FieldCount {
                    expected: 3,
                    found: [id, faculty].iter().filter(|f| f.is_some()).count(),
                    separator: STUDENT_SEPARATOR,
                })
            }
        };

        Ok(Student {
            id: required(id.trim(), "student id")?.to_string(),
            faculty: faculty.trim().to_string(),
            // Everything after the second comma belongs to the name
            name: name.trim().to_string(),
        })
    }
}

impl Student {
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.id,
            self.faculty,
            self.name,
            sep = STUDENT_SEPARATOR
        )
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RecordParseError> {
    if value.is_empty() {
        Err(RecordParseError::MissingField { field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_line() {
        let course: Course = "CMPUT 175;MWF 9:00;40;Smith".parse().unwrap();
        assert_eq!(course.name, "CMPUT 175");
        assert_eq!(course.timeslot.pattern, DayPattern::Mwf);
        assert_eq!(course.timeslot.time, "9:00");
        assert_eq!(course.capacity, 40);
        assert_eq!(course.lecturer, "Smith");
    }

    #[test]
    fn test_course_fields_are_trimmed() {
        let course: Course = " STAT 151 ; TR 13:30 ; 2 ; Lee \n".parse().unwrap();
        assert_eq!(course.name, "STAT 151");
        assert_eq!(course.timeslot.pattern, DayPattern::Tr);
        assert_eq!(course.timeslot.time, "13:30");
        assert_eq!(course.lecturer, "Lee");
    }

    #[test]
    fn test_non_mwf_days_token_reads_as_tr() {
        let slot: Timeslot = "TTh 10:00".parse().unwrap();
        assert_eq!(slot.pattern, DayPattern::Tr);
        let slot: Timeslot = "MWF-lab 10:00".parse().unwrap();
        assert_eq!(slot.pattern, DayPattern::Mwf);
    }

    #[test]
    fn test_course_line_missing_delimiter_fails() {
        let err = "CMPUT 175 MWF 9:00;40;Smith".parse::<Course>().unwrap_err();
        assert_eq!(
            err,
            RecordParseError::FieldCount {
                expected: 4,
                found: 3,
                separator: ';'
            }
        );
    }

    #[test]
    fn test_course_capacity_must_be_positive() {
        assert!(matches!(
            "CMPUT 175;MWF 9:00;0;Smith".parse::<Course>(),
            Err(RecordParseError::Capacity { .. })
        ));
        assert!(matches!(
            "CMPUT 175;MWF 9:00;forty;Smith".parse::<Course>(),
            Err(RecordParseError::Capacity { .. })
        ));
    }

    #[test]
    fn test_course_timeslot_needs_a_time() {
        assert!(matches!(
            "CMPUT 175;MWF;40;Smith".parse::<Course>(),
            Err(RecordParseError::Timeslot { .. })
        ));
    }

    #[test]
    fn test_enrollment_line_tolerates_noise() {
        assert_eq!(
            Enrollment::parse_line("CMPUT 175: 123456"),
            Some(Enrollment::new("CMPUT 175", "123456"))
        );
        assert_eq!(Enrollment::parse_line(""), None);
        assert_eq!(Enrollment::parse_line("CMPUT 175 123456"), None);
        assert_eq!(Enrollment::parse_line("CMPUT 175:   "), None);
        assert_eq!(
            Enrollment::new("CMPUT 175", "123456").to_line(),
            "CMPUT 175: 123456"
        );
    }

    #[test]
    fn test_student_name_keeps_commas() {
        let student: Student = "123456,SCI,Doe, Jane".parse().unwrap();
        assert_eq!(student.id, "123456");
        assert_eq!(student.faculty, "SCI");
        assert_eq!(student.name, "Doe, Jane");
        assert_eq!(student.to_line(), "123456,SCI,Doe, Jane");
    }

    #[test]
    fn test_student_line_needs_three_fields() {
        assert_eq!(
            "123456,SCI".parse::<Student>().unwrap_err(),
            RecordParseError::FieldCount {
                expected: 3,
                found: 2,
                separator: ','
            }
        );
    }

    #[test]
    fn test_normalize_course_id() {
        assert_eq!(normalize_course_id("  cmput 175\n"), "CMPUT 175");
    }
}
