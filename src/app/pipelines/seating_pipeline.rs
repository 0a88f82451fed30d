use crate::core::planner::build_plan;
use crate::core::reports::{render_reports, ReportOptions};
use crate::core::tables::{parse_faculty, parse_rooms, parse_students};
use crate::core::{ConfigProvider, ExamTables, Pipeline, ReportSet, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// Reads the three roster tables, plans the seating and writes the reports.
pub struct SeatingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SeatingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            reports: self.config.reports().to_vec(),
            seating_rooms: self.config.seating_rooms().to_vec(),
            write_plan: self.config.write_plan(),
            bundle: self.config.bundle(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SeatingPipeline<S, C> {
    async fn extract(&self) -> Result<ExamTables> {
        tracing::debug!("Reading faculty from: {}", self.config.faculty_path());
        let faculty = parse_faculty(&self.storage.read_file(self.config.faculty_path()).await?)?;

        tracing::debug!("Reading rooms from: {}", self.config.rooms_path());
        let rooms = parse_rooms(&self.storage.read_file(self.config.rooms_path()).await?)?;

        tracing::debug!("Reading students from: {}", self.config.students_path());
        let students = parse_students(&self.storage.read_file(self.config.students_path()).await?)?;

        Ok(ExamTables {
            faculty,
            rooms,
            students,
        })
    }

    async fn transform(&self, tables: ExamTables) -> Result<ReportSet> {
        let plan = build_plan(&tables, self.config.overflow_policy())?;
        let exports = render_reports(&plan, &self.report_options())?;
        Ok(ReportSet { plan, exports })
    }

    async fn load(&self, reports: ReportSet) -> Result<String> {
        let output_dir = self.config.output_path();

        for export in &reports.exports {
            let path = Path::new(output_dir).join(&export.file_name);
            let path = path.to_string_lossy();
            tracing::debug!(
                "Writing {} ({}, {} bytes)",
                path,
                export.content_type,
                export.data.len()
            );
            self.storage.write_file(&path, &export.data).await?;
        }

        Ok(output_dir.to_string())
    }
}
