use crate::core::seating::layout;
use crate::domain::model::{AllocationPlan, Export, RoomAssignment, SeatingGrid, StudentRecord};
use crate::domain::ports::ReportKind;
use crate::utils::error::{Result, SeatingError};
use std::collections::HashSet;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const TIMETABLE_FILE: &str = "Updated_Exam_Timetable.csv";
pub const SUMMARY_FILE: &str = "Room_Summary_Report.csv";
pub const PLAN_FILE: &str = "allocation_plan.json";
pub const BUNDLE_FILE: &str = "exam_reports.zip";
pub const SEATING_SHEET_NAME: &str = "Seating Arrangement";

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const JSON_MIME: &str = "application/json";
pub const ZIP_MIME: &str = "application/zip";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub reports: Vec<ReportKind>,
    /// Empty means every room in the plan.
    pub seating_rooms: Vec<String>,
    pub write_plan: bool,
    pub bundle: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            reports: ReportKind::ALL.to_vec(),
            seating_rooms: Vec::new(),
            write_plan: false,
            bundle: false,
        }
    }
}

/// Render every requested report for a plan, in a stable order.
pub fn render_reports(plan: &AllocationPlan, options: &ReportOptions) -> Result<Vec<Export>> {
    let mut exports = Vec::new();

    if options.reports.contains(&ReportKind::Timetable) {
        exports.push(timetable_csv(plan)?);
    }
    if options.reports.contains(&ReportKind::Summary) {
        exports.push(summary_csv(plan)?);
    }
    if options.reports.contains(&ReportKind::Seating) {
        let mut taken: HashSet<String> = HashSet::new();
        for assignment in seating_targets(plan, &options.seating_rooms)? {
            let mut export = seating_xlsx(&layout(assignment), &assignment.room_no)?;
            export.file_name = unique_file_name(&export.file_name, &mut taken);
            exports.push(export);
        }
    }
    if options.write_plan {
        exports.push(plan_json(plan)?);
    }
    if options.bundle && !exports.is_empty() {
        let bundle = bundle_zip(&exports)?;
        exports.push(bundle);
    }

    Ok(exports)
}

/// Assignments to chart, in plan order. Requested rooms are deduplicated and
/// a room number listed twice in the plan yields both of its assignments.
fn seating_targets<'a>(
    plan: &'a AllocationPlan,
    rooms: &[String],
) -> Result<Vec<&'a RoomAssignment>> {
    if rooms.is_empty() {
        return Ok(plan.assignments.iter().collect());
    }

    let mut requested: Vec<&str> = Vec::with_capacity(rooms.len());
    for room_no in rooms {
        if !requested.contains(&room_no.as_str()) {
            requested.push(room_no.as_str());
        }
    }

    if let Some(missing) = requested.iter().find(|r| plan.find_room(r).is_none()) {
        return Err(SeatingError::InvalidConfigValueError {
            field: "seating_rooms".to_string(),
            value: missing.to_string(),
            reason: "Room has no students assigned in this plan".to_string(),
        });
    }

    Ok(plan
        .assignments
        .iter()
        .filter(|a| requested.contains(&a.room_no.as_str()))
        .collect())
}

/// Suffix `_2`, `_3`, ... before the extension until the name is unused.
fn unique_file_name(file_name: &str, taken: &mut HashSet<String>) -> String {
    let (stem, ext) = file_name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, format!(".{}", ext)))
        .unwrap_or((file_name, String::new()));

    let mut candidate = file_name.to_string();
    let mut n = 2;
    while taken.contains(&candidate) {
        tracing::warn!("Seating file {} already used, trying suffix _{}", candidate, n);
        candidate = format!("{}_{}{}", stem, n, ext);
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Renders the raw pair list as `[(CSE, 101), (ECE, 201)]`.
///
/// Values are written bare rather than quoted; the column is meant to be read
/// by people, not parsed back.
pub fn format_assigned_students(students: &[StudentRecord]) -> String {
    let pairs: Vec<String> = students
        .iter()
        .map(|s| format!("({}, {})", s.branch, s.identifier))
        .collect();
    format!("[{}]", pairs.join(", "))
}

/// One `"first - last"` range per branch, in the order branches first appear.
pub fn branch_ranges(assignment: &RoomAssignment) -> Vec<String> {
    let mut ranges: Vec<(&str, &str, &str)> = Vec::new();

    for student in &assignment.students {
        match ranges.iter_mut().find(|(branch, _, _)| *branch == student.branch) {
            Some(entry) => entry.2 = student.identifier.as_str(),
            None => ranges.push((
                student.branch.as_str(),
                student.identifier.as_str(),
                student.identifier.as_str(),
            )),
        }
    }

    ranges
        .into_iter()
        .map(|(_, first, last)| format!("{} - {}", first, last))
        .collect()
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| SeatingError::IoError(e.into_error()))
}

pub fn timetable_csv(plan: &AllocationPlan) -> Result<Export> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Room No", "Assigned Students", "Total Students", "Invigilator"])?;

    for assignment in &plan.assignments {
        writer.write_record([
            assignment.room_no.as_str(),
            format_assigned_students(&assignment.students).as_str(),
            assignment.total_students().to_string().as_str(),
            assignment.invigilator.as_str(),
        ])?;
    }

    Ok(Export {
        file_name: TIMETABLE_FILE.to_string(),
        content_type: CSV_MIME,
        data: finish_csv(writer)?,
    })
}

pub fn summary_csv(plan: &AllocationPlan) -> Result<Export> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Room No", "Ranges", "Total Students"])?;

    for assignment in &plan.assignments {
        writer.write_record([
            assignment.room_no.as_str(),
            branch_ranges(assignment).join("\n").as_str(),
            assignment.total_students().to_string().as_str(),
        ])?;
    }

    Ok(Export {
        file_name: SUMMARY_FILE.to_string(),
        content_type: CSV_MIME,
        data: finish_csv(writer)?,
    })
}

pub fn plan_json(plan: &AllocationPlan) -> Result<Export> {
    Ok(Export {
        file_name: PLAN_FILE.to_string(),
        content_type: JSON_MIME,
        data: serde_json::to_vec_pretty(plan)?,
    })
}

/// Room numbers end up in file names; keep them filesystem safe.
pub fn seating_file_name(room_no: &str) -> String {
    let safe: String = room_no
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("Seating_Arrangement_{}.xlsx", safe)
}

// Fixed timestamp so identical plans produce identical archives.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// Spreadsheet column name for a zero-based index: 0 -> A, 26 -> AA.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn sheet_xml(grid: &SeatingGrid) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
"#,
    );

    for (r, row) in grid.rows.iter().enumerate() {
        let row_no = r + 1;
        xml.push_str(&format!("<row r=\"{}\">", row_no));
        for (c, value) in row.iter().enumerate() {
            // Blank seats are left out entirely, as Excel does.
            if value.is_empty() {
                continue;
            }
            xml.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                column_letter(c),
                row_no,
                quick_xml::escape::escape(value.as_str())
            ));
        }
        xml.push_str("</row>\n");
    }

    xml.push_str("</sheetData>\n</worksheet>");
    xml
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="{}" sheetId="1" r:id="rId1"/>
</sheets>
</workbook>"#,
        SEATING_SHEET_NAME
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Single-sheet workbook holding the grid, no header row or index column.
pub fn seating_xlsx(grid: &SeatingGrid, room_no: &str) -> Result<Export> {
    let data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", entry_options())?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

        zip.start_file("_rels/.rels", entry_options())?;
        zip.write_all(ROOT_RELS_XML.as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", entry_options())?;
        zip.write_all(WORKBOOK_RELS_XML.as_bytes())?;

        zip.start_file("xl/workbook.xml", entry_options())?;
        zip.write_all(workbook_xml().as_bytes())?;

        zip.start_file("xl/worksheets/sheet1.xml", entry_options())?;
        zip.write_all(sheet_xml(grid).as_bytes())?;

        zip.finish()?.into_inner()
    };

    Ok(Export {
        file_name: seating_file_name(room_no),
        content_type: XLSX_MIME,
        data,
    })
}

pub fn bundle_zip(exports: &[Export]) -> Result<Export> {
    tracing::debug!("Bundling {} exports", exports.len());

    let data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for export in exports {
            zip.start_file(export.file_name.as_str(), entry_options())?;
            zip.write_all(&export.data)?;
        }
        zip.finish()?.into_inner()
    };

    Ok(Export {
        file_name: BUNDLE_FILE.to_string(),
        content_type: ZIP_MIME,
        data,
    })
}
