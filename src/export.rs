use std::{error::Error, fs::File, io::Write, path::Path};

use crate::schedule::models::Course;

/// Column headers of the exported sheet
const HEADERS: [&str; 7] = ["课程名称", "教师", "周次", "单双周", "教室", "星期", "节次"];

/// Write the extracted records to a CSV file.
///
/// The file starts with a UTF-8 BOM so spreadsheet apps pick the right
/// encoding when opening it directly.
pub fn write(courses: &[Course], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut file = File::create(path)?;
    file.write_all(b"\xef\xbb\xbf")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADERS)?;
    for course in courses {
        writer.write_record([
            course.name.as_str(),
            course.teacher.as_str(),
            course.weeks.as_str(),
            course.parity.label(),
            course.room.as_str(),
            course.weekday.as_str(),
            course.slot.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
