use serde::{Deserialize, Serialize};

/// One exam-taker, tagged with the branch column it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub branch: String,
    pub identifier: String,
}

impl StudentRecord {
    pub fn new(branch: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCapacity {
    pub room_no: String,
    pub capacity: usize,
}

impl RoomCapacity {
    pub fn new(room_no: impl Into<String>, capacity: usize) -> Self {
        Self {
            room_no: room_no.into(),
            capacity,
        }
    }
}

/// Students seated in one room, in combined-roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    pub room_no: String,
    pub students: Vec<StudentRecord>,
    pub invigilator: String,
}

impl RoomAssignment {
    pub fn total_students(&self) -> usize {
        self.students.len()
    }
}

/// Result of allocating a combined roster to rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub assignments: Vec<RoomAssignment>,
    /// Tail of the combined roster that no room reached.
    pub unseated: Vec<StudentRecord>,
    pub total_capacity: usize,
}

impl AllocationPlan {
    pub fn seated_count(&self) -> usize {
        self.assignments.iter().map(RoomAssignment::total_students).sum()
    }

    pub fn has_overflow(&self) -> bool {
        !self.unseated.is_empty()
    }

    pub fn find_room(&self, room_no: &str) -> Option<&RoomAssignment> {
        self.assignments.iter().find(|a| a.room_no == room_no)
    }
}

/// Seating chart for one room. Row 0 is the room/invigilator header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingGrid {
    pub rows: Vec<Vec<String>>,
}

impl SeatingGrid {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn seats(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyTable {
    pub invigilators: Vec<String>,
}

/// Wide students table: one column per branch, columns may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentsTable {
    pub branches: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl StudentsTable {
    pub fn non_empty_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamTables {
    pub faculty: FacultyTable,
    pub rooms: Vec<RoomCapacity>,
    pub students: StudentsTable,
}

/// A rendered report, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReportSet {
    pub plan: AllocationPlan,
    pub exports: Vec<Export>,
}

impl ReportSet {
    pub fn export(&self, file_name: &str) -> Option<&Export> {
        self.exports.iter().find(|e| e.file_name == file_name)
    }
}
