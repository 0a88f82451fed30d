pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::SeatingPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{engine::SeatingEngine, planner::build_plan};
pub use utils::error::{Result, SeatingError};
