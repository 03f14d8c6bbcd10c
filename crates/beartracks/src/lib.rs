//! Course enrollment manager backed by three flat record files.
//!
//! The [`registrar::Registrar`] sequences every operation against a
//! [`store::RecordStore`]; [`console`] and [`server`] are thin front ends
//! over it.

pub mod catalog;
pub mod config;
pub mod console;
pub mod enrollment;
pub mod error;
pub mod records;
pub mod registrar;
pub mod roster;
pub mod server;
pub mod store;
pub mod timetable;

pub use config::{AppConfig, ConfigError};
pub use error::{RecordParseError, RegistrarError, StoreError};
pub use records::{Course, DayPattern, Enrollment, Student, Timeslot};
pub use registrar::{CourseListing, DropReceipt, EnrollmentReceipt, Registrar};
pub use store::{FlatFileStore, MemoryStore, RecordStore, StorePaths};
pub use timetable::{build_timetable, render_timetable, Timetable};
