use crate::core::allocator::{allocate, apply_overflow_policy};
use crate::core::roster::combine;
use crate::domain::model::{AllocationPlan, ExamTables};
use crate::domain::ports::OverflowPolicy;
use crate::utils::error::Result;

/// Combine the roster and seat it. Pure: same tables, same plan.
pub fn build_plan(tables: &ExamTables, policy: OverflowPolicy) -> Result<AllocationPlan> {
    let combined = combine(&tables.students);
    let plan = allocate(&combined, &tables.rooms, &tables.faculty.invigilators)?;

    tracing::info!(
        "Seated {} of {} students in {} room(s)",
        plan.seated_count(),
        combined.len(),
        plan.assignments.len()
    );

    apply_overflow_policy(plan, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FacultyTable, RoomCapacity, StudentRecord, StudentsTable};
    use crate::utils::error::SeatingError;

    fn tables() -> ExamTables {
        ExamTables {
            faculty: FacultyTable {
                invigilators: vec!["X".to_string()],
            },
            rooms: vec![RoomCapacity::new("R1", 2), RoomCapacity::new("R2", 5)],
            students: StudentsTable {
                branches: vec!["A".to_string(), "B".to_string()],
                rows: vec![
                    vec![Some("1".to_string()), Some("3".to_string())],
                    vec![Some("2".to_string()), None],
                ],
            },
        }
    }

    #[test]
    fn test_build_plan_end_to_end() {
        let plan = build_plan(&tables(), OverflowPolicy::Drop).unwrap();

        assert_eq!(plan.assignments.len(), 2);
        assert_eq!(
            plan.assignments[0].students,
            vec![StudentRecord::new("A", "1"), StudentRecord::new("B", "3")]
        );
        assert_eq!(plan.assignments[0].invigilator, "X");
        assert_eq!(plan.assignments[1].students, vec![StudentRecord::new("A", "2")]);
        assert_eq!(plan.assignments[1].invigilator, "X");
    }

    #[test]
    fn test_build_plan_rejects_overflow_when_asked() {
        let mut t = tables();
        t.rooms = vec![RoomCapacity::new("R1", 2)];

        assert_eq!(build_plan(&t, OverflowPolicy::Drop).unwrap().unseated.len(), 1);
        assert!(matches!(
            build_plan(&t, OverflowPolicy::Reject),
            Err(SeatingError::CapacityOverflowError { unseated: 1, .. })
        ));
    }

    #[test]
    fn test_blank_faculty_rows_do_not_take_a_rotation_slot() {
        // A blank Faculty cell is dropped before rotation, so rooms cycle X, Y, X
        // rather than X, <blank>, Y.
        let faculty = crate::core::tables::parse_faculty(b"Dept,Faculty\nCSE,X\nECE,\nME,Y\n").unwrap();
        assert_eq!(faculty.invigilators, vec!["X", "Y"]);

        let t = ExamTables {
            faculty,
            rooms: vec![
                RoomCapacity::new("R1", 1),
                RoomCapacity::new("R2", 1),
                RoomCapacity::new("R3", 1),
            ],
            students: StudentsTable {
                branches: vec!["A".to_string()],
                rows: vec![
                    vec![Some("1".to_string())],
                    vec![Some("2".to_string())],
                    vec![Some("3".to_string())],
                ],
            },
        };
        let plan = build_plan(&t, OverflowPolicy::Drop).unwrap();
        let invigilators: Vec<&str> = plan.assignments.iter().map(|a| a.invigilator.as_str()).collect();
        assert_eq!(invigilators, vec!["X", "Y", "X"]);
    }
}
