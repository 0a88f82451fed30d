use exam_seating::core::allocator::allocate;
use exam_seating::core::roster::combine;
use exam_seating::core::seating::{layout, SEATING_COLUMNS};
use exam_seating::core::{RoomCapacity, StudentRecord, StudentsTable};

/// Ragged table: branch `b` has `lengths[b]` students.
fn ragged_table(lengths: &[usize]) -> StudentsTable {
    let height = lengths.iter().copied().max().unwrap_or(0);
    StudentsTable {
        branches: (0..lengths.len()).map(|b| format!("B{}", b)).collect(),
        rows: (0..height)
            .map(|r| {
                lengths
                    .iter()
                    .enumerate()
                    .map(|(b, &len)| (r < len).then(|| format!("B{}-{:03}", b, r)))
                    .collect()
            })
            .collect(),
    }
}

fn invigilators(k: usize) -> Vec<String> {
    (0..k).map(|i| format!("INV{}", i)).collect()
}

#[test]
fn test_combined_length_equals_non_empty_cells() {
    for lengths in [vec![], vec![0, 0], vec![3], vec![5, 2, 7], vec![1, 4, 4, 0, 2]] {
        let table = ragged_table(&lengths);
        let combined = combine(&table);
        assert_eq!(combined.len(), lengths.iter().sum::<usize>(), "{:?}", lengths);
        assert_eq!(combined.len(), table.non_empty_cells());
    }
}

#[test]
fn test_combined_order_is_row_then_branch() {
    let combined = combine(&ragged_table(&[3, 1, 2]));
    let ids: Vec<&str> = combined.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(
        ids,
        vec!["B0-000", "B1-000", "B2-000", "B0-001", "B2-001", "B0-002"]
    );
}

#[test]
fn test_allocation_invariants_over_many_shapes() {
    let combined = combine(&ragged_table(&[9, 6, 11]));

    for capacities in [vec![5], vec![4, 4, 4], vec![10, 1, 30], vec![3, 3, 3, 3, 3, 3, 3, 3, 3, 3]] {
        for k in 1..=4 {
            let rooms: Vec<RoomCapacity> = capacities
                .iter()
                .enumerate()
                .map(|(i, &cap)| RoomCapacity::new(format!("R{}", i), cap))
                .collect();
            let plan = allocate(&combined, &rooms, &invigilators(k)).unwrap();

            assert!(plan.seated_count() <= combined.len());
            assert_eq!(plan.seated_count() + plan.unseated.len(), combined.len());

            let mut last_room_index = None;
            for (i, assignment) in plan.assignments.iter().enumerate() {
                let room_index = rooms
                    .iter()
                    .position(|r| r.room_no == assignment.room_no)
                    .unwrap();
                assert!(assignment.total_students() <= rooms[room_index].capacity);
                assert!(last_room_index.map_or(true, |last| room_index > last));
                last_room_index = Some(room_index);
                assert_eq!(assignment.invigilator, format!("INV{}", i % k));
            }

            let seated: Vec<StudentRecord> = plan
                .assignments
                .iter()
                .flat_map(|a| a.students.iter().cloned())
                .chain(plan.unseated.iter().cloned())
                .collect();
            assert_eq!(seated, combined);
        }
    }
}

#[test]
fn test_layout_matches_column_major_formula() {
    for n in 1usize..=17 {
        let assignment = exam_seating::core::RoomAssignment {
            room_no: "R".to_string(),
            students: (0..n).map(|i| StudentRecord::new("A", format!("s{}", i))).collect(),
            invigilator: "I".to_string(),
        };
        let grid = layout(&assignment);
        let rows = n.div_ceil(SEATING_COLUMNS);

        assert_eq!(grid.seats().len(), rows);
        for (r, row) in grid.seats().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let index = r + c * rows;
                if index < n {
                    assert_eq!(cell, &format!("s{}", index));
                } else {
                    assert!(cell.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_two_branch_example_end_to_end() {
    let table = StudentsTable {
        branches: vec!["A".to_string(), "B".to_string()],
        rows: vec![
            vec![Some("1".to_string()), Some("3".to_string())],
            vec![Some("2".to_string()), None],
        ],
    };
    let combined = combine(&table);
    assert_eq!(
        combined,
        vec![
            StudentRecord::new("A", "1"),
            StudentRecord::new("B", "3"),
            StudentRecord::new("A", "2"),
        ]
    );

    let rooms = vec![RoomCapacity::new("R1", 2), RoomCapacity::new("R2", 5)];
    let plan = allocate(&combined, &rooms, &["X".to_string()]).unwrap();
    assert_eq!(plan.assignments[0].students, combined[..2].to_vec());
    assert_eq!(plan.assignments[1].students, combined[2..].to_vec());
    assert!(plan.assignments.iter().all(|a| a.invigilator == "X"));
}
