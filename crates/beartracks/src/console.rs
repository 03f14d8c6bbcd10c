//! Interactive menu front end.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::error;

use crate::error::RegistrarError;
use crate::records::Student;
use crate::registrar::Registrar;
use crate::store::RecordStore;
use crate::timetable::render_timetable;

const MENU: &str = "\nWhat would you like to do?\n1. Print timetable\n2. Enroll in course\n3. Drop course\n4. Add new student\n5. Remove student\n6. Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    PrintTimetable,
    Enroll,
    Drop,
    AddStudent,
    RemoveStudent,
    Quit,
}

impl FromStr for MenuAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuAction::PrintTimetable),
            "2" => Ok(MenuAction::Enroll),
            "3" => Ok(MenuAction::Drop),
            "4" => Ok(MenuAction::AddStudent),
            "5" => Ok(MenuAction::RemoveStudent),
            "6" => Ok(MenuAction::Quit),
            _ => Err(()),
        }
    }
}

/// Menu loop over any line-oriented input and output.
pub struct Console<'a, S, R, W> {
    registrar: &'a Registrar<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(registrar: &'a Registrar<S>, input: R, output: W) -> Self {
        Self {
            registrar,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "==========================")?;
        writeln!(self.output, "Welcome to Mini-BearTracks")?;
        writeln!(self.output, "==========================")?;

        loop {
            let action = match self.choose_action()? {
                Some(action) => action,
                None => MenuAction::Quit,
            };

            match action {
                MenuAction::PrintTimetable => self.print_timetable()?,
                MenuAction::Enroll => self.enroll()?,
                MenuAction::Drop => self.drop_course()?,
                MenuAction::AddStudent => self.add_student()?,
                MenuAction::RemoveStudent => self.remove_student()?,
                MenuAction::Quit => {
                    writeln!(self.output, "Goodbye")?;
                    return Ok(());
                }
            }
        }
    }

    fn choose_action(&mut self) -> io::Result<Option<MenuAction>> {
        writeln!(self.output, "{MENU}")?;
        loop {
            let Some(choice) = self.prompt("> ")? else {
                return Ok(None);
            };
            match choice.parse::<MenuAction>() {
                Ok(action) => return Ok(Some(action)),
                Err(()) => writeln!(
                    self.output,
                    "Sorry, invalid entry. Please enter a choice from 1 to 6."
                )?,
            }
        }
    }

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a student id and resolves it, printing `on_missing` if unknown.
    fn prompt_student(&mut self, on_missing: &str) -> io::Result<Option<Student>> {
        let Some(id) = self.prompt("\nStudent ID: ")? else {
            return Ok(None);
        };
        match self.registrar.student(&id) {
            Ok(student) => Ok(Some(student)),
            Err(RegistrarError::UnknownStudent { .. }) => {
                writeln!(self.output, "{on_missing}")?;
                Ok(None)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &RegistrarError) -> io::Result<()> {
        if let RegistrarError::Store(store_err) = err {
            error!("Record store failure: {}", store_err);
        }
        writeln!(self.output, "{err}")
    }

    fn print_timetable(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("\nStudent ID: ")? else {
            return Ok(());
        };

        match self.registrar.timetable(&id) {
            Ok((student, timetable)) => {
                writeln!(
                    self.output,
                    "Timetable for {}, in the faculty of {}",
                    student.name.to_uppercase(),
                    student.faculty
                )?;
                for warning in timetable.warnings() {
                    writeln!(self.output, "Warning: {warning}")?;
                }
                write!(self.output, "{}", render_timetable(&timetable))
            }
            Err(RegistrarError::UnknownStudent { .. }) => {
                writeln!(self.output, "Invalid student ID. Cannot print timetable.")
            }
            Err(e) => self.report(&e),
        }
    }

    fn enroll(&mut self) -> io::Result<()> {
        let Some(student) =
            self.prompt_student("Invalid student ID. Cannot continue with course enrollment.")?
        else {
            return Ok(());
        };
        let Some(course) = self.prompt("Course name: ")? else {
            return Ok(());
        };

        match self.registrar.enroll(&student.id, &course) {
            Ok(receipt) => writeln!(
                self.output,
                "{} has successfully been enrolled in {}, on {}",
                student.name, receipt.course.name, receipt.course.timeslot
            ),
            Err(RegistrarError::AlreadyEnrolled { course, .. }) => writeln!(
                self.output,
                "\n{} is already enrolled in {}.",
                student.name, course
            ),
            Err(e) => self.report(&e),
        }
    }

    fn drop_course(&mut self) -> io::Result<()> {
        let Some(student) =
            self.prompt_student("Invalid student ID. Cannot continue with dropping a course.")?
        else {
            return Ok(());
        };

        let courses = match self.registrar.enrolled_courses(&student.id) {
            Ok(courses) => courses,
            Err(e) => return self.report(&e),
        };
        if courses.is_empty() {
            return writeln!(
                self.output,
                "\n{} is not enrolled in any courses.",
                student.name
            );
        }

        writeln!(self.output, "Select course to drop:")?;
        for course in &courses {
            writeln!(self.output, "- {course}")?;
        }
        let Some(course) = self.prompt("> ")? else {
            return Ok(());
        };

        match self.registrar.drop_course(&student.id, &course) {
            Ok(receipt) => writeln!(
                self.output,
                "\n{} has successfully dropped {}.",
                student.name, receipt.course
            ),
            Err(RegistrarError::NotEnrolled { course, .. }) => writeln!(
                self.output,
                "Drop failed. {} is not currently registered in {}.",
                student.name, course
            ),
            Err(e) => self.report(&e),
        }
    }

    fn add_student(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("\nNew student ID (6 digits): ")? else {
            return Ok(());
        };
        let faculties = self.registrar.roster_policy().faculties().join(", ");
        let Some(faculty) = self.prompt(&format!("Faculty ({faculties}): "))? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Full name: ")? else {
            return Ok(());
        };

        match self.registrar.add_student(&id, &faculty, &name) {
            Ok(student) => writeln!(
                self.output,
                "Student {} ({}) added successfully.",
                student.name, student.id
            ),
            Err(e) => self.report(&e),
        }
    }

    fn remove_student(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("\nStudent ID to remove: ")? else {
            return Ok(());
        };

        match self.registrar.remove_student(&id) {
            Ok(student) => writeln!(
                self.output,
                "Student with ID {} ({}) has been removed.",
                student.id, student.name
            ),
            Err(RegistrarError::UnknownStudent { student }) => {
                writeln!(self.output, "Student with ID {student} not found.")
            }
            Err(e) => self.report(&e),
        }
    }
}
