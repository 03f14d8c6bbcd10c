use std::fs;
use std::path::Path;

use beartracks::records::DayPattern;
use beartracks::{render_timetable, FlatFileStore, Registrar, RegistrarError, StorePaths};
use tempfile::tempdir;

fn seed(dir: &Path, courses: &str, enrollments: &str, students: &str) -> Registrar<FlatFileStore> {
    let paths = StorePaths::in_dir(dir);
    fs::write(&paths.courses, courses).unwrap();
    fs::write(&paths.enrollments, enrollments).unwrap();
    fs::write(&paths.students, students).unwrap();
    Registrar::new(FlatFileStore::open(paths))
}

fn enrollment_file(dir: &Path) -> String {
    fs::read_to_string(StorePaths::in_dir(dir).enrollments).unwrap()
}

#[test]
fn test_full_seat_lifecycle() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let registrar = seed(
        dir,
        "CMPUT 175;MWF 9:00;1;Smith\n",
        "",
        "123456,SCI,Jane Doe\n654321,ART,John Roe\n",
    );

    let receipt = registrar.enroll("123456", "CMPUT 175").unwrap();
    assert_eq!(receipt.course.timeslot.to_string(), "MWF 9:00");
    assert_eq!(enrollment_file(dir), "CMPUT 175: 123456\n");

    let (_, timetable) = registrar.timetable("123456").unwrap();
    let slot = timetable.get(DayPattern::Mwf, "9:00").unwrap();
    assert_eq!(slot.course, "CMPUT 175");
    assert_eq!(slot.open_seats, 0);

    let err = registrar.enroll("654321", "CMPUT 175").unwrap_err();
    assert!(matches!(err, RegistrarError::AtCapacity { capacity: 1, .. }));
    assert_eq!(enrollment_file(dir), "CMPUT 175: 123456\n");

    registrar.drop_course("123456", "CMPUT 175").unwrap();
    assert_eq!(enrollment_file(dir), "");
    let (_, timetable) = registrar.timetable("123456").unwrap();
    assert!(timetable.is_empty());

    // The freed seat is available again
    registrar.enroll("654321", "cmput 175").unwrap();
    assert_eq!(enrollment_file(dir), "CMPUT 175: 654321\n");
}

#[test]
fn test_conflicts_are_per_cell() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let registrar = seed(
        dir,
        "CMPUT 175;MWF 9:00;40;Smith\nMATH 125;MWF 9:00;40;Kim\nMATH 134;MWF 10:00;40;Kim\nSTAT 151;TR 9:00;40;Lee\n",
        "CMPUT 175: 123456\n",
        "123456,SCI,Jane Doe\n",
    );

    match registrar.enroll("123456", "MATH 125").unwrap_err() {
        RegistrarError::ScheduleConflict {
            pattern,
            time,
            existing,
            ..
        } => {
            assert_eq!(pattern, DayPattern::Mwf);
            assert_eq!(time, "9:00");
            assert_eq!(existing, "CMPUT 175");
        }
        other => panic!("expected a schedule conflict, got {other:?}"),
    }

    // Same pattern at another time, and the same time on the other pattern
    registrar.enroll("123456", "MATH 134").unwrap();
    registrar.enroll("123456", "STAT 151").unwrap();
    assert_eq!(
        registrar.enrolled_courses("123456").unwrap(),
        ["CMPUT 175", "MATH 134", "STAT 151"]
    );
}

#[test]
fn test_hand_edited_files() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let registrar = seed(
        dir,
        "CMPUT 175;MWF 9:00;40;Smith",
        "CMPUT 175: 123456\n\nnot an enrollment\nMATH 999: 123456",
        "123456,SCI,Doe, Jane Q.",
    );

    let (student, timetable) = registrar.timetable("123456").unwrap();
    assert_eq!(student.name, "Doe, Jane Q.");
    assert_eq!(timetable.len(), 1);
    assert_eq!(timetable.warnings().len(), 1);
    assert_eq!(
        timetable.get(DayPattern::Mwf, "9:00").unwrap().open_seats,
        39
    );

    // Appends go on their own line even without a trailing newline
    registrar.add_student("222333", "eng", "Sam Lee").unwrap();
    let students = fs::read_to_string(StorePaths::in_dir(dir).students).unwrap();
    assert_eq!(students, "123456,SCI,Doe, Jane Q.\n222333,ENG,Sam Lee\n");
}

#[test]
fn test_removed_student_keeps_enrollments() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();
    let registrar = seed(
        dir,
        "CMPUT 175;MWF 9:00;2;Smith\n",
        "CMPUT 175: 654321\n",
        "123456,SCI,Jane Doe\n654321,ART,John Roe\n",
    );

    registrar.remove_student("654321").unwrap();
    assert!(matches!(
        registrar.timetable("654321"),
        Err(RegistrarError::UnknownStudent { .. })
    ));
    assert_eq!(enrollment_file(dir), "CMPUT 175: 654321\n");

    // The orphaned row still holds its seat
    let (_, timetable) = registrar.timetable("123456").unwrap();
    assert!(timetable.is_empty());
    registrar.enroll("123456", "CMPUT 175").unwrap();
    let (_, timetable) = registrar.timetable("123456").unwrap();
    assert_eq!(
        timetable.get(DayPattern::Mwf, "9:00").unwrap().open_seats,
        0
    );
}

#[test]
fn test_sample_data_set() {
    let source = StorePaths::in_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data"));
    let tmp = tempdir().unwrap();
    let paths = StorePaths::in_dir(tmp.path());
    fs::copy(&source.courses, &paths.courses).unwrap();
    fs::copy(&source.enrollments, &paths.enrollments).unwrap();
    fs::copy(&source.students, &paths.students).unwrap();
    let registrar = Registrar::new(FlatFileStore::open(paths.clone()));

    let (student, timetable) = registrar.timetable("123456").unwrap();
    assert_eq!(student.name, "Jane Doe");
    assert_eq!(timetable.len(), 2);
    assert!(timetable.warnings().is_empty());
    assert_eq!(
        timetable.get(DayPattern::Mwf, "9:00").unwrap().course,
        "CMPUT 175"
    );
    assert_eq!(
        timetable.get(DayPattern::Tr, "11:00").unwrap().open_seats,
        29
    );
    let rendered = render_timetable(&timetable);
    assert!(rendered.contains("CMP* 175"));
    assert!(rendered.contains("STAT 151"));

    let (student, _) = registrar.timetable("456789").unwrap();
    assert_eq!(student.name, "Doe, John Q.");

    registrar.enroll("123456", "MATH 134").unwrap();
    let enrollments = fs::read_to_string(&paths.enrollments).unwrap();
    assert!(enrollments.ends_with("ECON 101: 456789\nMATH 134: 123456\n"));

    // The checked-in files are untouched
    assert!(!fs::read_to_string(&source.enrollments)
        .unwrap()
        .contains("MATH 134: 123456"));
}
