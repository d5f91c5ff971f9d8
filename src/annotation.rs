use regex::Regex;

use crate::schedule::models::{Course, Parity};

/// One booking recovered from a source cell, before it is tied to a
/// grid position. Fields the annotation did not carry stay `None`;
/// they only become blank strings at materialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Booking {
    pub name: String,
    pub teacher: Option<String>,
    pub weeks: Option<String>,
    pub parity: Parity,
    pub room: Option<String>,
}

impl Booking {
    /// Materialize the booking for one (weekday, time slot) position
    #[must_use]
    pub fn place(&self, weekday: &str, slot: &str) -> Course {
        Course {
            name: self.name.clone(),
            teacher: self.teacher.clone().unwrap_or_default(),
            weeks: self.weeks.clone().unwrap_or_default(),
            parity: self.parity,
            room: self.room.clone().unwrap_or_default(),
            weekday: weekday.to_owned(),
            slot: slot.to_owned(),
        }
    }
}

/// Fields recovered from one name/teacher segment. `week_room` is set
/// when the segment carries its week/room group inline instead of as a
/// separate semicolon-delimited segment.
#[derive(Debug, Default)]
struct SegmentMatch {
    name: Option<String>,
    teacher: Option<String>,
    week_room: Option<String>,
}

/// Ordered extraction strategies for a name/teacher segment, most
/// specific first. The first one to produce anything wins.
const STRATEGIES: &[fn(&str) -> Option<SegmentMatch>] = &[inline, exact, loose];

/// `NAME(CODE) (TEACHER) (WEEKS,ROOM)`, a fully annotated booking in a
/// single segment. The course code is dropped.
fn inline(segment: &str) -> Option<SegmentMatch> {
    let re = Regex::new(r"^(.+?)\((.+?)\) \((.+?)\) \((.+?)\)$").unwrap();
    let caps = re.captures(segment)?;
    Some(SegmentMatch {
        name: Some(caps[1].trim().to_owned()),
        teacher: Some(caps[3].trim().to_owned()),
        week_room: Some(caps[4].trim().to_owned()),
    })
}

/// `NAME(CODE) (TEACHER)`, the shape the portal writes when the
/// week/room group follows as its own segment
fn exact(segment: &str) -> Option<SegmentMatch> {
    let re = Regex::new(r"^(.+?)\((.+?)\) \((.+?)\)$").unwrap();
    let caps = re.captures(segment)?;
    Some(SegmentMatch {
        name: Some(caps[1].trim().to_owned()),
        teacher: Some(caps[3].trim().to_owned()),
        week_room: None,
    })
}

/// Last resort: the name before the first parenthesis and a trailing
/// `) (TEACHER)`, matched independently so either may fail on its own
fn loose(segment: &str) -> Option<SegmentMatch> {
    let name = Regex::new(r"^(.+?)\(")
        .unwrap()
        .captures(segment)
        .map(|caps| caps[1].trim().to_owned());
    let teacher = Regex::new(r"\) \((.+?)\)$")
        .unwrap()
        .captures(segment)
        .map(|caps| caps[1].trim().to_owned());

    if name.is_none() && teacher.is_none() {
        return None;
    }
    Some(SegmentMatch {
        name,
        teacher,
        week_room: None,
    })
}

/// Split the inside of a `(WEEKS,ROOM)` group. Components beyond the
/// room are ignored, as the portal never writes more than two.
fn week_room(group: &str) -> (Option<String>, Parity, Option<String>) {
    let inner = group.trim_matches(|c| c == '(' || c == ')');
    let mut parts = inner.split(',');

    let weeks = parts
        .next()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(ToOwned::to_owned);
    let parity = weeks.as_deref().map_or(Parity::Every, Parity::from_weeks);
    let room = parts
        .next()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToOwned::to_owned);

    (weeks, parity, room)
}

/// Extract the bookings encoded in one source cell.
///
/// The `title` annotation is the primary path; when it is absent or
/// yields nothing, the cell's visible text is tried instead. Entries
/// with no recoverable name are discarded, so every returned booking
/// has a non-empty name.
#[must_use]
pub fn parse(title: Option<&str>, text: &str) -> Vec<Booking> {
    let mut bookings = title.map(from_title).unwrap_or_default();
    if bookings.is_empty() {
        bookings = from_text(text);
    }
    bookings
}

/// Walk the semicolon-delimited annotation two segments at a time:
/// a name/teacher segment, then an optional parenthesized week/room
/// segment. When the week/room segment is missing or malformed we only
/// advance by one, which keeps the walk aligned on sloppy input.
fn from_title(title: &str) -> Vec<Booking> {
    let segments: Vec<&str> = title
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut bookings = Vec::new();
    let mut i = 0;
    while i < segments.len() {
        let fields = STRATEGIES
            .iter()
            .find_map(|strategy| strategy(segments[i]))
            .unwrap_or_default();
        i += 1;

        let (mut weeks, mut parity, mut room) = (None, Parity::Every, None);
        if let Some(group) = &fields.week_room {
            (weeks, parity, room) = week_room(group);
        } else if i < segments.len()
            && segments[i].starts_with('(')
            && segments[i].contains(')')
        {
            (weeks, parity, room) = week_room(segments[i]);
            i += 1;
        }

        if let Some(name) = fields.name {
            bookings.push(Booking {
                name,
                teacher: fields.teacher,
                weeks,
                parity,
                room,
            });
        }
    }

    bookings
}

/// Fallback on the cell's visible text: the first non-blank line names
/// the course and teacher, and every following fully-parenthesized
/// line contributes one booking with its week/room group.
fn from_text(text: &str) -> Vec<Booking> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let fields = if first.contains('(') && first.contains(')') {
        loose(first).unwrap_or_default()
    } else {
        SegmentMatch::default()
    };
    let Some(name) = fields.name else {
        return Vec::new();
    };

    let mut bookings = Vec::new();
    for line in &lines[1..] {
        if line.starts_with('(') && line.ends_with(')') {
            let (weeks, parity, room) = week_room(line);
            bookings.push(Booking {
                name: name.clone(),
                teacher: fields.teacher.clone(),
                weeks,
                parity,
                room,
            });
        }
    }

    bookings
}
