use crate::domain::model::{FacultyTable, RoomCapacity, StudentsTable};
use crate::utils::error::{Result, SeatingError};
use csv::{ReaderBuilder, StringRecord, Trim};

pub const FACULTY_TABLE: &str = "faculty";
pub const ROOMS_TABLE: &str = "room capacity";
pub const STUDENTS_TABLE: &str = "students";

pub const FACULTY_COLUMN: &str = "Faculty";
pub const ROOM_NO_COLUMN: &str = "Room No";
pub const CAPACITY_COLUMN: &str = "Capacity";

fn reader(data: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data)
}

fn column_index(headers: &StringRecord, table: &str, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SeatingError::MissingColumnError {
            table: table.to_string(),
            column: column.to_string(),
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

pub fn parse_faculty(data: &[u8]) -> Result<FacultyTable> {
    let mut rdr = reader(data);
    let headers = rdr.headers()?.clone();
    let idx = column_index(&headers, FACULTY_TABLE, FACULTY_COLUMN)?;

    let mut invigilators = Vec::new();
    for record in rdr.records() {
        let record = record?;
        match record.get(idx) {
            Some(name) if !name.is_empty() => invigilators.push(name.to_string()),
            _ => tracing::debug!("Skipping blank faculty entry on line {}", line_of(&record)),
        }
    }

    tracing::debug!("Parsed {} invigilators", invigilators.len());
    Ok(FacultyTable { invigilators })
}

fn parse_capacity(raw: &str, line: u64) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(SeatingError::DataShapeError {
            table: ROOMS_TABLE.to_string(),
            message: format!(
                "line {}: capacity '{}' is not a positive whole number",
                line, raw
            ),
        }),
    }
}

pub fn parse_rooms(data: &[u8]) -> Result<Vec<RoomCapacity>> {
    let mut rdr = reader(data);
    let headers = rdr.headers()?.clone();
    let room_idx = column_index(&headers, ROOMS_TABLE, ROOM_NO_COLUMN)?;
    let capacity_idx = column_index(&headers, ROOMS_TABLE, CAPACITY_COLUMN)?;

    let mut rooms = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = line_of(&record);
        let room_no = record.get(room_idx).unwrap_or_default();
        if room_no.is_empty() {
            return Err(SeatingError::DataShapeError {
                table: ROOMS_TABLE.to_string(),
                message: format!("line {}: room number is blank", line),
            });
        }
        let capacity = parse_capacity(record.get(capacity_idx).unwrap_or_default(), line)?;
        rooms.push(RoomCapacity::new(room_no, capacity));
    }

    tracing::debug!("Parsed {} rooms", rooms.len());
    Ok(rooms)
}

/// Every column is a branch. Short rows are padded with empty cells.
pub fn parse_students(data: &[u8]) -> Result<StudentsTable> {
    let mut rdr = reader(data);
    let branches: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Column {}", i + 1)
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = (0..branches.len())
            .map(|i| {
                record
                    .get(i)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
            })
            .collect();
        rows.push(row);
    }

    tracing::debug!("Parsed {} branches over {} rows", branches.len(), rows.len());
    Ok(StudentsTable { branches, rows })
}
