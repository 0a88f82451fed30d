use crate::domain::model::{StudentRecord, StudentsTable};

/// Flatten the wide students table into the combined roster.
///
/// Rows are scanned in input order and, within a row, branches in declared
/// column order, so branches interleave round-robin: row 0 of every branch,
/// then row 1 of every branch, and so on. Empty cells are skipped.
pub fn combine(table: &StudentsTable) -> Vec<StudentRecord> {
    let mut combined = Vec::with_capacity(table.non_empty_cells());

    for row in &table.rows {
        for (branch, cell) in table.branches.iter().zip(row.iter()) {
            if let Some(identifier) = cell.as_deref().filter(|id| !id.trim().is_empty()) {
                combined.push(StudentRecord::new(branch.as_str(), identifier));
            }
        }
    }

    tracing::debug!(
        "Combined {} students across {} branches",
        combined.len(),
        table.branches.len()
    );
    combined
}
