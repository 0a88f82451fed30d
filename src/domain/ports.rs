use crate::domain::model::{ExamTables, ReportSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Timetable,
    Summary,
    Seating,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Timetable, ReportKind::Summary, ReportKind::Seating];
}

/// What to do with students left over once every room is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Leave them out of every report and log a warning.
    #[default]
    Drop,
    /// Fail the run.
    Reject,
}

pub trait ConfigProvider: Send + Sync {
    fn faculty_path(&self) -> &str;
    fn rooms_path(&self) -> &str;
    fn students_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn reports(&self) -> &[ReportKind];
    /// Rooms to render seating charts for; empty means every room.
    fn seating_rooms(&self) -> &[String];
    fn overflow_policy(&self) -> OverflowPolicy;
    fn bundle(&self) -> bool;
    fn write_plan(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExamTables>;
    async fn transform(&self, tables: ExamTables) -> Result<ReportSet>;
    async fn load(&self, reports: ReportSet) -> Result<String>;
}
