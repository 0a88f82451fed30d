pub mod seating_pipeline;

pub use seating_pipeline::SeatingPipeline;
