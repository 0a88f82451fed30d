use crate::domain::model::{RoomAssignment, SeatingGrid};

/// Desks per row in every exam room.
pub const SEATING_COLUMNS: usize = 4;

/// Lay one room's students out on a 4-column grid, filled column-major.
///
/// With `n` students the grid has `ceil(n / 4)` rows and seat `[r][c]`
/// holds student `r + c * rows`, so the first `rows` students go down the
/// first column. A header row with the room and invigilator comes first.
pub fn layout(assignment: &RoomAssignment) -> SeatingGrid {
    let identifiers: Vec<&str> = assignment
        .students
        .iter()
        .map(|s| s.identifier.as_str())
        .collect();
    let total = identifiers.len();
    let rows = total.div_ceil(SEATING_COLUMNS);

    let mut header = vec![
        format!("Room: {}", assignment.room_no),
        format!("Invigilator: {}", assignment.invigilator),
    ];
    header.resize(SEATING_COLUMNS, String::new());

    let mut grid = Vec::with_capacity(rows + 1);
    grid.push(header);

    for r in 0..rows {
        let row = (0..SEATING_COLUMNS)
            .map(|c| {
                identifiers
                    .get(r + c * rows)
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            })
            .collect();
        grid.push(row);
    }

    SeatingGrid { rows: grid }
}
