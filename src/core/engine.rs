use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct SeatingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SeatingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Loading roster tables...");
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} invigilators, {} rooms, {} branches",
            tables.faculty.invigilators.len(),
            tables.rooms.len(),
            tables.students.branches.len()
        );

        tracing::info!("Building seating plan...");
        let reports = self.pipeline.transform(tables).await?;
        tracing::info!("Rendered {} report file(s)", reports.exports.len());

        tracing::info!("Writing reports...");
        let output_path = self.pipeline.load(reports).await?;
        tracing::info!("Reports saved to: {}", output_path);

        Ok(output_path)
    }
}
