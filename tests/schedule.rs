// tests/schedule.rs
use kebiao::schedule::{
    self,
    models::{Cell, Parity},
};
use scraper::Html;

fn page(table: &str) -> Html {
    Html::parse_document(&format!("<html><body>{table}</body></html>"))
}

const HEADER: &str = "<thead><tr><th>节次</th><th>周一</th><th>周二</th></tr></thead>";

#[test]
fn grid_positions_follow_the_header_and_slot_labels() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" title="微积分(001) (张三);(1-16,教1-101)">微积分</td>
                <td></td></tr>
            <tr><td>3-4节</td>
                <td></td>
                <td class="infoTitle" title="大学英语(002) (李四);(2-17,教2-202)">大学英语</td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    assert_eq!(grid.weekdays, ["周一", "周二"]);
    assert_eq!(grid.slots, ["1-2节", "3-4节"]);

    let courses = schedule::collect(&grid);
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].name, "微积分");
    assert_eq!(courses[0].weekday, "周一");
    assert_eq!(courses[0].slot, "1-2节");
    assert_eq!(courses[0].room, "教1-101");
    assert_eq!(courses[1].name, "大学英语");
    assert_eq!(courses[1].weekday, "周二");
    assert_eq!(courses[1].slot, "3-4节");
}

#[test]
fn rowspan_emits_one_record_per_covered_time_slot() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" rowspan="2" title="物理实验(010) (周九);(1-16,实验楼B)">物理实验</td>
                <td></td></tr>
            <tr><td>3-4节</td>
                <td class="infoTitle" title="高等数学(011) (吴十);(1-16,教4-404)">高等数学</td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    let courses = schedule::collect(&grid);

    let physics: Vec<_> = courses.iter().filter(|c| c.name == "物理实验").collect();
    assert_eq!(physics.len(), 2);
    assert_eq!(physics[0].slot, "1-2节");
    assert_eq!(physics[1].slot, "3-4节");
    assert!(physics.iter().all(|c| c.weekday == "周一"));

    // The second row's course cell nominally sits at the first column,
    // but the rowspan above already owns it, so it lands one to the right
    let math = courses.iter().find(|c| c.name == "高等数学").unwrap();
    assert_eq!(math.weekday, "周二");
    assert_eq!(math.slot, "3-4节");
}

#[test]
fn colspan_emits_one_record_per_covered_weekday() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" colspan="2" title="形势与政策(020) (郑一);(1-8,大礼堂)">形势与政策</td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    assert!(grid.cells[0]
        .iter()
        .all(|cell| *cell != Cell::Unresolved));

    let courses = schedule::collect(&grid);
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].weekday, "周一");
    assert_eq!(courses[1].weekday, "周二");
    assert!(courses.iter().all(|c| c.slot == "1-2节"));
    assert!(courses.iter().all(|c| c.name == "形势与政策"));
}

#[test]
fn course_cell_with_unparseable_annotation_becomes_empty() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" title="待定"></td>
                <td></td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    assert_eq!(grid.cells[0][0], Cell::Empty);
    assert_eq!(grid.cells[0][1], Cell::Empty);
    assert!(schedule::collect(&grid).is_empty());
}

#[test]
fn oversized_spans_are_clamped_and_overflow_cells_skipped() {
    // colspan way past the table edge, plus a trailing cell with no
    // free column left: neither may panic or index out of range
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" colspan="99" title="体育(030) (冯二);(1-16,操场)">体育</td>
                <td class="infoTitle" title="幽灵课程(031) (陈三);(1-16,无处)">幽灵课程</td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    let courses = schedule::collect(&grid);
    assert_eq!(courses.len(), 2);
    assert!(courses.iter().all(|c| c.name == "体育"));
}

#[test]
fn parity_marker_survives_to_the_flattened_record() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" title="化学(040) (褚四);(1-15单,教5-505)">化学</td>
                <td></td></tr>
        </tbody></table>"#
    ));

    let courses = schedule::collect(&schedule::build(&document));
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].parity, Parity::Odd);
    assert_eq!(courses[0].weeks, "1-15单");
}

#[test]
fn fallback_text_cell_parses_without_title() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle">离散数学(002) (李四)<br>(1-8,教2-205)</td>
                <td></td></tr>
        </tbody></table>"#
    ));

    let courses = schedule::collect(&schedule::build(&document));
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "离散数学");
    assert_eq!(courses[0].teacher, "李四");
    assert_eq!(courses[0].weeks, "1-8");
    assert_eq!(courses[0].room, "教2-205");
}

#[test]
fn table_without_body_rows_yields_an_empty_grid() {
    let document = page(&format!(r#"<table id="manualArrangeCourseTable">{HEADER}</table>"#));

    let grid = schedule::build(&document);
    assert_eq!(grid.slots.len(), 0);
    assert!(schedule::collect(&grid).is_empty());
}

#[test]
fn page_without_the_table_yields_an_empty_grid() {
    let document = page("<p>课表维护中</p>");

    let grid = schedule::build(&document);
    assert!(grid.weekdays.is_empty());
    assert!(grid.slots.is_empty());
    assert!(schedule::collect(&grid).is_empty());
}

#[test]
fn collect_is_pure_and_repeatable() {
    let document = page(&format!(
        r#"<table id="manualArrangeCourseTable">{HEADER}<tbody>
            <tr><td>1-2节</td>
                <td class="infoTitle" title="微积分(001) (张三);(1-16,教1-101)">微积分</td>
                <td></td></tr>
        </tbody></table>"#
    ));

    let grid = schedule::build(&document);
    assert_eq!(schedule::collect(&grid), schedule::collect(&grid));
}
