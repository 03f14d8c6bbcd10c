//! Fixed-width text grid for a timetable.

use std::fmt::Write;

use super::Timetable;
use crate::records::DayPattern;

const CELL_WIDTH: usize = 12;
const TIME_WIDTH: usize = 5;

/// Display columns and the day-pattern bucket each one reads from.
pub const DISPLAY_DAYS: [(&str, DayPattern); 5] = [
    ("Mon", DayPattern::Mwf),
    ("Tues", DayPattern::Tr),
    ("Wed", DayPattern::Mwf),
    ("Thurs", DayPattern::Tr),
    ("Fri", DayPattern::Mwf),
];

/// Half-hour rows from 8:00 to 16:30.
pub const DISPLAY_TIMES: [&str; 18] = [
    "8:00", "8:30", "9:00", "9:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
];

/// Shortens the subject part of a course identifier to fit a grid cell.
///
/// Subjects longer than four characters keep their first three and gain a
/// `*`: `CMPUT 175` becomes `CMP* 175`, `STAT 151` is unchanged.
pub fn abbreviate_course(course: &str) -> String {
    let (subject, number) = match course.trim().split_once(char::is_whitespace) {
        Some((subject, number)) => (subject, Some(number.trim())),
        None => (course.trim(), None),
    };

    let subject = if subject.chars().count() > 4 {
        let mut short: String = subject.chars().take(3).collect();
        short.push('*');
        short
    } else {
        subject.to_string()
    };

    match number {
        Some(number) => format!("{subject} {number}"),
        None => subject,
    }
}

/// Renders the timetable as a monospaced week grid.
///
/// Each half-hour row takes three lines: the course, its open seats, and a
/// separator. MWF columns close every second row, TR columns every third, and
/// every sixth row gets a full `+` junction line.
pub fn render_timetable(timetable: &Timetable) -> String {
    let mut out = String::new();

    out.push_str(&" ".repeat(TIME_WIDTH));
    for (label, _) in DISPLAY_DAYS {
        let _ = write!(out, " {label:^CELL_WIDTH$}");
    }
    out.push('\n');

    out.push_str(&" ".repeat(TIME_WIDTH));
    out.push('+');
    for _ in DISPLAY_DAYS {
        out.push_str(&"-".repeat(CELL_WIDTH));
        out.push('+');
    }
    out.push('\n');

    for (row, time) in DISPLAY_TIMES.iter().enumerate() {
        let _ = write!(out, "{time:<TIME_WIDTH$}|");
        for (_, pattern) in DISPLAY_DAYS {
            let text = timetable
                .get(pattern, time)
                .map(|slot| abbreviate_course(&slot.course))
                .unwrap_or_default();
            let _ = write!(out, "{text:^CELL_WIDTH$}|");
        }
        out.push('\n');

        out.push_str(&" ".repeat(TIME_WIDTH));
        out.push('|');
        for (_, pattern) in DISPLAY_DAYS {
            let text = timetable
                .get(pattern, time)
                .map(|slot| slot.open_seats.to_string())
                .unwrap_or_default();
            let _ = write!(out, "{text:^CELL_WIDTH$}|");
        }
        out.push('\n');

        out.push_str(&separator_line(row));
        out.push('\n');
    }

    out
}

fn separator_line(row: usize) -> String {
    let junction = if row % 6 == 5 { '+' } else { '|' };
    let mut line = " ".repeat(TIME_WIDTH);
    line.push(junction);

    for (_, pattern) in DISPLAY_DAYS {
        let closed = match pattern {
            DayPattern::Mwf => row % 2 == 1,
            DayPattern::Tr => row % 3 == 2,
        };
        let fill = if closed { '-' } else { ' ' };
        line.extend(std::iter::repeat(fill).take(CELL_WIDTH));
        line.push(junction);
    }

    line
}
