use scraper::{ElementRef, Html, Selector};

use crate::annotation;

pub mod models;

use models::{Cell, Course, Grid};

/// Id of the timetable on the course table page
const TABLE_ID: &str = "#manualArrangeCourseTable";

/// Class the portal puts on cells that actually hold a course
const COURSE_CLASS: &str = "infoTitle";

/// Rebuild the logical timetable grid from the course table page.
///
/// Weekday labels come from the header cells after the first, time-slot
/// labels from each body row's first cell. Source cells may span several
/// rows and columns; every position a cell claims gets its own record
/// list, tagged with that position's own weekday and time slot. A page
/// without the expected table or body yields an empty grid, which the
/// caller reports as zero extracted courses.
#[must_use]
pub fn build(document: &Html) -> Grid {
    let sel_table = Selector::parse(TABLE_ID).unwrap();
    let sel_th = Selector::parse("th").unwrap();
    let sel_tr = Selector::parse("tbody tr").unwrap();
    let sel_td = Selector::parse("td").unwrap();

    let Some(table) = document.select(&sel_table).next() else {
        return Grid::default();
    };

    // Skip the first header, it titles the time-slot column
    let weekdays: Vec<String> = table
        .select(&sel_th)
        .skip(1)
        .map(|th| label_text(&th))
        .collect();

    let mut slots = Vec::new();
    let mut rows = Vec::new();
    for tr in table.select(&sel_tr) {
        let cells: Vec<ElementRef> = tr.select(&sel_td).collect();
        if let Some(first) = cells.first() {
            slots.push(label_text(first));
            rows.push(cells);
        }
    }

    let width = weekdays.len();
    let height = slots.len();
    let mut cells = vec![vec![Cell::Unresolved; width]; height];

    for (row, tds) in rows.iter().enumerate() {
        let mut col = 0;
        for td in tds.iter().skip(1) {
            // A rowspan from an earlier row may already own this row at
            // the cell's nominal column; slide right to the next free one
            while col < width && cells[row][col] != Cell::Unresolved {
                col += 1;
            }
            if col >= width {
                // Malformed spans pushed the cursor past the last weekday
                break;
            }

            let rowspan = span(td, "rowspan");
            let colspan = span(td, "colspan");

            let bookings = if is_course_cell(td) {
                annotation::parse(td.value().attr("title"), &visible_text(td))
            } else {
                Vec::new()
            };

            for r in row..height.min(row + rowspan) {
                for c in col..width.min(col + colspan) {
                    if bookings.is_empty() {
                        if cells[r][c] == Cell::Unresolved {
                            cells[r][c] = Cell::Empty;
                        }
                    } else {
                        // One record per covered position: a colspan means
                        // the booking recurs on each spanned weekday
                        let courses = bookings
                            .iter()
                            .map(|booking| booking.place(&weekdays[c], &slots[r]))
                            .collect();
                        cells[r][c] = Cell::Courses(courses);
                    }
                }
            }

            col += colspan;
        }
    }

    Grid {
        weekdays,
        slots,
        cells,
    }
}

/// Flatten the grid into the final record sequence, time-slot-major
/// then weekday order. Empty and unclaimed positions contribute
/// nothing; no record is reordered or deduplicated.
#[must_use]
pub fn collect(grid: &Grid) -> Vec<Course> {
    let mut courses = Vec::new();
    for row in &grid.cells {
        for cell in row {
            if let Cell::Courses(entries) = cell {
                courses.extend(entries.iter().cloned());
            }
        }
    }
    courses
}

/// Span attribute of a cell, clamped to at least 1
fn span(cell: &ElementRef, attr: &str) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|v| v.trim().parse().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

fn is_course_cell(cell: &ElementRef) -> bool {
    cell.value().classes().any(|class| class == COURSE_CLASS)
}

/// Label of a header or time-slot cell, whitespace stripped
fn label_text(cell: &ElementRef) -> String {
    cell.text().map(str::trim).collect()
}

/// Visible text of a course cell, one line per non-blank text node
fn visible_text(cell: &ElementRef) -> String {
    cell.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
