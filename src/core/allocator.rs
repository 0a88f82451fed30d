use crate::domain::model::{AllocationPlan, RoomAssignment, RoomCapacity, StudentRecord};
use crate::domain::ports::OverflowPolicy;
use crate::utils::error::{Result, SeatingError};

/// Fill rooms sequentially from the combined roster.
///
/// Each room takes the next `capacity` students. The cursor always advances
/// by the full capacity, so once the roster runs out the remaining rooms get
/// nothing and are left out of the plan. Invigilators are handed out
/// cyclically over the rooms that made it into the plan.
pub fn allocate(
    combined: &[StudentRecord],
    rooms: &[RoomCapacity],
    invigilators: &[String],
) -> Result<AllocationPlan> {
    if rooms.is_empty() {
        return Err(SeatingError::ConfigurationError {
            message: "no rooms to assign students to".to_string(),
        });
    }
    if invigilators.is_empty() {
        return Err(SeatingError::ConfigurationError {
            message: "no invigilators available".to_string(),
        });
    }

    let mut cursor = 0usize;
    let mut filled: Vec<(&RoomCapacity, &[StudentRecord])> = Vec::with_capacity(rooms.len());

    for room in rooms {
        let start = cursor.min(combined.len());
        let end = cursor.saturating_add(room.capacity).min(combined.len());
        let slice = &combined[start..end];

        if slice.is_empty() {
            tracing::debug!("Room {} left empty: roster exhausted", room.room_no);
        } else {
            filled.push((room, slice));
        }
        cursor = cursor.saturating_add(room.capacity);
    }

    let assignments: Vec<RoomAssignment> = filled
        .into_iter()
        .zip(invigilators.iter().cycle())
        .map(|((room, slice), invigilator)| RoomAssignment {
            room_no: room.room_no.clone(),
            students: slice.to_vec(),
            invigilator: invigilator.clone(),
        })
        .collect();

    let unseated = combined[cursor.min(combined.len())..].to_vec();
    let total_capacity = rooms
        .iter()
        .map(|r| r.capacity)
        .fold(0usize, usize::saturating_add);

    if !unseated.is_empty() {
        tracing::warn!(
            "{} student(s) exceed total capacity {} and were not seated",
            unseated.len(),
            total_capacity
        );
    }

    Ok(AllocationPlan {
        assignments,
        unseated,
        total_capacity,
    })
}

/// Decide what an overflowing plan means for the run.
pub fn apply_overflow_policy(plan: AllocationPlan, policy: OverflowPolicy) -> Result<AllocationPlan> {
    match policy {
        OverflowPolicy::Reject if plan.has_overflow() => Err(SeatingError::CapacityOverflowError {
            unseated: plan.unseated.len(),
            total_capacity: plan.total_capacity,
        }),
        _ => Ok(plan),
    }
}
