/// Record store for the course, enrollment and student tables

mod memory;

pub use memory::MemoryStore;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::records::{Course, Enrollment, Student};

pub const COURSES_FILE: &str = "courses.txt";
pub const ENROLLMENTS_FILE: &str = "enrollment.txt";
pub const STUDENTS_FILE: &str = "students.txt";

/// Full-scan reads plus the narrow set of writes the registrar needs.
///
/// Implementations refuse to store a (course, student) pair twice.
pub trait RecordStore {
    fn read_courses(&self) -> Result<Vec<Course>, StoreError>;

    fn read_enrollments(&self) -> Result<Vec<Enrollment>, StoreError>;

    fn read_students(&self) -> Result<Vec<Student>, StoreError>;

    /// Appends one enrollment row, failing with `DuplicateEnrollment` if the
    /// pair is already present.
    fn append_enrollment(&mut self, enrollment: &Enrollment) -> Result<(), StoreError>;

    /// Removes every enrollment row matching `predicate`, returning how many
    /// were removed.
    fn remove_enrollments(
        &mut self,
        predicate: &dyn Fn(&Enrollment) -> bool,
    ) -> Result<usize, StoreError>;

    fn append_student(&mut self, student: &Student) -> Result<(), StoreError>;

    /// Removes every student row matching `predicate`, returning how many were
    /// removed.
    fn remove_students(&mut self, predicate: &dyn Fn(&Student) -> bool)
        -> Result<usize, StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn read_courses(&self) -> Result<Vec<Course>, StoreError> {
        (**self).read_courses()
    }

    fn read_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        (**self).read_enrollments()
    }

    fn read_students(&self) -> Result<Vec<Student>, StoreError> {
        (**self).read_students()
    }

    fn append_enrollment(&mut self, enrollment: &Enrollment) -> Result<(), StoreError> {
        (**self).append_enrollment(enrollment)
    }

    fn remove_enrollments(
        &mut self,
        predicate: &dyn Fn(&Enrollment) -> bool,
    ) -> Result<usize, StoreError> {
        (**self).remove_enrollments(predicate)
    }

    fn append_student(&mut self, student: &Student) -> Result<(), StoreError> {
        (**self).append_student(student)
    }

    fn remove_students(
        &mut self,
        predicate: &dyn Fn(&Student) -> bool,
    ) -> Result<usize, StoreError> {
        (**self).remove_students(predicate)
    }
}

/// Locations of the three backing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub courses: PathBuf,
    pub enrollments: PathBuf,
    pub students: PathBuf,
}

impl StorePaths {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            courses: dir.join(COURSES_FILE),
            enrollments: dir.join(ENROLLMENTS_FILE),
            students: dir.join(STUDENTS_FILE),
        }
    }
}

/// Store backed by the three delimited text files.
///
/// Missing files read as empty tables and are created by the first append.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    paths: StorePaths,
}

impl FlatFileStore {
    pub fn open(paths: StorePaths) -> Self {
        info!(
            "Using record files {}, {}, {}",
            paths.courses.display(),
            paths.enrollments.display(),
            paths.students.display()
        );
        Self { paths }
    }
}

impl RecordStore for FlatFileStore {
    fn read_courses(&self) -> Result<Vec<Course>, StoreError> {
        let path = &self.paths.courses;
        read_lines(path)?
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.parse::<Course>()
                    .map_err(|source| malformed(path, idx, source))
            })
            .collect()
    }

    fn read_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        let path = &self.paths.enrollments;
        let lines = read_lines(path)?;
        let mut enrollments = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().enumerate() {
            match Enrollment::parse_line(line) {
                Some(enrollment) => enrollments.push(enrollment),
                None if line.trim().is_empty() => {}
                None => debug!(
                    "Skipping enrollment line {} in {}: {:?}",
                    idx + 1,
                    path.display(),
                    line
                ),
            }
        }

        Ok(enrollments)
    }

    fn read_students(&self) -> Result<Vec<Student>, StoreError> {
        let path = &self.paths.students;
        read_lines(path)?
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.parse::<Student>()
                    .map_err(|source| malformed(path, idx, source))
            })
            .collect()
    }

    fn append_enrollment(&mut self, enrollment: &Enrollment) -> Result<(), StoreError> {
        let existing = self.read_enrollments()?;
        if existing.contains(enrollment) {
            return Err(StoreError::DuplicateEnrollment {
                course: enrollment.course.clone(),
                student: enrollment.student.clone(),
            });
        }

        append_line(&self.paths.enrollments, &enrollment.to_line())
    }

    fn remove_enrollments(
        &mut self,
        predicate: &dyn Fn(&Enrollment) -> bool,
    ) -> Result<usize, StoreError> {
        let enrollments = self.read_enrollments()?;
        let before = enrollments.len();
        let kept: Vec<String> = enrollments
            .iter()
            .filter(|e| !predicate(e))
            .map(Enrollment::to_line)
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            rewrite(&self.paths.enrollments, &kept)?;
        }
        Ok(removed)
    }

    fn append_student(&mut self, student: &Student) -> Result<(), StoreError> {
        append_line(&self.paths.students, &student.to_line())
    }

    fn remove_students(
        &mut self,
        predicate: &dyn Fn(&Student) -> bool,
    ) -> Result<usize, StoreError> {
        let students = self.read_students()?;
        let before = students.len();
        let kept: Vec<String> = students
            .iter()
            .filter(|s| !predicate(s))
            .map(Student::to_line)
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            rewrite(&self.paths.students, &kept)?;
        }
        Ok(removed)
    }
}

fn malformed(path: &Path, idx: usize, source: crate::error::RecordParseError) -> StoreError {
    StoreError::Malformed {
        path: path.display().to_string(),
        line: idx + 1,
        source,
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, reading as empty", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), StoreError> {
    // Hand-edited files often lack a trailing newline
    let needs_newline = match fs::read_to_string(path) {
        Ok(content) => !content.is_empty() && !content.ends_with('\n'),
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;

    let mut record = String::with_capacity(line.len() + 2);
    if needs_newline {
        record.push('\n');
    }
    record.push_str(line);
    record.push('\n');

    file.write_all(record.as_bytes())
        .map_err(|e| StoreError::io(path, e))?;
    debug!("Appended {:?} to {}", line, path.display());
    Ok(())
}

/// Replaces the file contents by writing a sibling temp file and renaming it.
fn rewrite(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    debug!("Rewrote {} with {} records", path.display(), lines.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_read_as_empty() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::open(StorePaths::in_dir(dir.path()));
        assert!(store.read_courses().unwrap().is_empty());
        assert!(store.read_enrollments().unwrap().is_empty());
        assert!(store.read_students().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_course_reports_line_number() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(
            dir.join(COURSES_FILE),
            "CMPUT 175;MWF 9:00;40;Smith\n\nSTAT 151 TR 9:00;40;Lee\n",
        )
        .unwrap();
        let store = FlatFileStore::open(StorePaths::in_dir(dir));

        match store.read_courses() {
            Err(StoreError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_append_adds_missing_trailing_newline() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join(ENROLLMENTS_FILE), "CMPUT 175: 111111").unwrap();
        let mut store = FlatFileStore::open(StorePaths::in_dir(dir));

        store
            .append_enrollment(&Enrollment::new("STAT 151", "111111"))
            .unwrap();

        let content = fs::read_to_string(dir.join(ENROLLMENTS_FILE)).unwrap();
        assert_eq!(content, "CMPUT 175: 111111\nSTAT 151: 111111\n");
    }

    #[test]
    fn test_append_refuses_duplicate_pair() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        let mut store = FlatFileStore::open(StorePaths::in_dir(dir));
        let row = Enrollment::new("CMPUT 175", "111111");

        store.append_enrollment(&row).unwrap();
        assert!(matches!(
            store.append_enrollment(&row),
            Err(StoreError::DuplicateEnrollment { .. })
        ));
        assert_eq!(store.read_enrollments().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_enrollments_rewrites_remaining_rows() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(
            dir.join(ENROLLMENTS_FILE),
            "CMPUT 175: 111111\nnoise\nCMPUT 175: 222222\n\nSTAT 151: 111111\n",
        )
        .unwrap();
        let mut store = FlatFileStore::open(StorePaths::in_dir(dir));

        let removed = store
            .remove_enrollments(&|e: &Enrollment| e.matches("111111", "CMPUT 175"))
            .unwrap();

        assert_eq!(removed, 1);
        let content = fs::read_to_string(dir.join(ENROLLMENTS_FILE)).unwrap();
        assert_eq!(content, "CMPUT 175: 222222\nSTAT 151: 111111\n");
        assert!(!dir.join("enrollment.txt.tmp").exists());
    }

    #[test]
    fn test_remove_nothing_leaves_file_untouched() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join(STUDENTS_FILE), "111111,SCI,Ada\n\n").unwrap();
        let mut store = FlatFileStore::open(StorePaths::in_dir(dir));

        assert_eq!(store.remove_students(&|s: &Student| s.id == "999999").unwrap(), 0);
        let content = fs::read_to_string(dir.join(STUDENTS_FILE)).unwrap();
        assert_eq!(content, "111111,SCI,Ada\n\n");
    }
}
