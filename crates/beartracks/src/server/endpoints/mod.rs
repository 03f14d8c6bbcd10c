pub mod enrollment;
pub mod status;
pub mod students;
pub mod timetable;
