pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, OverflowPolicy, ReportKind};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "exam-seating")]
#[command(about = "Assign exam-takers to rooms and invigilators and render seating reports")]
pub struct CliConfig {
    /// Faculty CSV with a `Faculty` column
    #[arg(long, default_value = "Faculty.csv")]
    pub faculty: String,

    /// Room CSV with `Room No` and `Capacity` columns
    #[arg(long, default_value = "RoomCapacity.csv")]
    pub rooms: String,

    /// Students CSV, one column per branch
    #[arg(long, default_value = "Students.csv")]
    pub students: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Reports to generate
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = ReportKind::ALL.to_vec())]
    pub reports: Vec<ReportKind>,

    /// Only render seating charts for these rooms (repeatable)
    #[arg(long = "room")]
    pub seating_rooms: Vec<String>,

    /// What to do with students that do not fit in any room
    #[arg(long, value_enum, default_value_t = OverflowPolicy::Drop)]
    pub on_overflow: OverflowPolicy,

    /// Also write every report into a single zip archive
    #[arg(long)]
    pub bundle: bool,

    /// Also write the allocation plan as JSON
    #[arg(long)]
    pub plan_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn faculty_path(&self) -> &str {
        &self.faculty
    }

    fn rooms_path(&self) -> &str {
        &self.rooms
    }

    fn students_path(&self) -> &str {
        &self.students
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn reports(&self) -> &[ReportKind] {
        &self.reports
    }

    fn seating_rooms(&self) -> &[String] {
        &self.seating_rooms
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        self.on_overflow
    }

    fn bundle(&self) -> bool {
        self.bundle
    }

    fn write_plan(&self) -> bool {
        self.plan_json
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_csv_input("faculty", &self.faculty)?;
        validation::validate_csv_input("rooms", &self.rooms)?;
        validation::validate_csv_input("students", &self.students)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_list("reports", &self.reports)?;
        for room in &self.seating_rooms {
            validation::validate_non_empty_string("room", room)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["exam-seating"]);
        assert_eq!(config.faculty, "Faculty.csv");
        assert_eq!(config.output_path, "./output");
        assert_eq!(config.reports, ReportKind::ALL.to_vec());
        assert_eq!(config.on_overflow, OverflowPolicy::Drop);
        assert!(config.seating_rooms.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_report_selection() {
        let config = CliConfig::parse_from([
            "exam-seating",
            "--reports",
            "summary,seating",
            "--room",
            "101",
            "--room",
            "102",
            "--on-overflow",
            "reject",
            "--bundle",
        ]);
        assert_eq!(config.reports(), &[ReportKind::Summary, ReportKind::Seating]);
        assert_eq!(config.seating_rooms(), &["101".to_string(), "102".to_string()]);
        assert_eq!(config.overflow_policy(), OverflowPolicy::Reject);
        assert!(config.bundle());
        assert!(!config.write_plan());
    }

    #[test]
    fn test_cli_rejects_non_csv_input() {
        let config = CliConfig::parse_from(["exam-seating", "--students", "Students.xlsx"]);
        assert!(config.validate().is_err());
    }
}
