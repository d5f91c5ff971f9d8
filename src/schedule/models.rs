/// Whether a booking runs every week or only on odd/even weeks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parity {
    #[default]
    Every,
    Odd,
    Even,
}

impl Parity {
    /// Derive the parity from a week-range string, e.g. "1-16(单)"
    pub fn from_weeks(weeks: &str) -> Self {
        if weeks.contains('单') {
            Self::Odd
        } else if weeks.contains('双') {
            Self::Even
        } else {
            Self::Every
        }
    }

    /// Label used in exported files, matching the portal's own wording
    pub fn label(self) -> &'static str {
        match self {
            Self::Every => "",
            Self::Odd => "单周",
            Self::Even => "双周",
        }
    }
}

/// One booking at one (weekday, time slot) position of the grid.
///
/// This is the final unit of output: immutable once created, consumed
/// as-is by the collector and the exporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    /// Course's name
    pub name: String,

    /// Teacher's name, blank when the annotation did not carry one
    pub teacher: String,

    /// Raw week-range string, e.g. "1-16"
    pub weeks: String,

    /// Odd/even week restriction encoded in the week range
    pub parity: Parity,

    /// Classroom, blank when the annotation did not carry one
    pub room: String,

    /// Weekday label of the grid column this record belongs to
    pub weekday: String,

    /// Time-slot label of the grid row this record belongs to
    pub slot: String,
}

/// State of one reconstructed grid position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    /// Not claimed by any source cell yet
    #[default]
    Unresolved,
    /// Claimed by a source cell holding no course
    Empty,
    /// One or more bookings starting or continuing here
    Courses(Vec<Course>),
}

/// Logical timetable reconstructed from the spanned HTML table.
///
/// `cells` is indexed `[time slot][weekday]` and always measures
/// `slots.len() × weekdays.len()`.
#[derive(Debug, Default)]
pub struct Grid {
    /// Weekday labels from the header row, in column order
    pub weekdays: Vec<String>,

    /// Time-slot labels from each body row's first cell, in row order
    pub slots: Vec<String>,

    /// Grid positions, time-slot-major
    pub cells: Vec<Vec<Cell>>,
}
