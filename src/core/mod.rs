pub mod allocator;
pub mod engine;
pub mod planner;
pub mod reports;
pub mod roster;
pub mod seating;
pub mod tables;

pub use crate::domain::model::{
    AllocationPlan, ExamTables, Export, ReportSet, RoomAssignment, RoomCapacity, SeatingGrid,
    StudentRecord, StudentsTable,
};
pub use crate::domain::ports::{ConfigProvider, OverflowPolicy, Pipeline, ReportKind, Storage};
pub use crate::utils::error::Result;
