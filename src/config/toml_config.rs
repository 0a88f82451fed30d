use crate::core::{ConfigProvider, OverflowPolicy, ReportKind};
use crate::utils::error::{Result, SeatingError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub session: SessionConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub faculty: String,
    pub rooms: String,
    pub students: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default)]
    pub on_overflow: OverflowPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_reports")]
    pub reports: Vec<ReportKind>,
    #[serde(default)]
    pub seating_rooms: Vec<String>,
    #[serde(default)]
    pub bundle: bool,
    #[serde(default)]
    pub plan_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// `"compact"` (default) or `"json"`
    pub format: Option<String>,
}

fn default_reports() -> Vec<ReportKind> {
    ReportKind::ALL.to_vec()
}

impl TomlConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeatingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SeatingError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("session.name", &self.session.name)?;
        validation::validate_csv_input("input.faculty", &self.input.faculty)?;
        validation::validate_csv_input("input.rooms", &self.input.rooms)?;
        validation::validate_csv_input("input.students", &self.input.students)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_non_empty_list("output.reports", &self.output.reports)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(SeatingError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn faculty_path(&self) -> &str {
        &self.input.faculty
    }

    fn rooms_path(&self) -> &str {
        &self.input.rooms
    }

    fn students_path(&self) -> &str {
        &self.input.students
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn reports(&self) -> &[ReportKind] {
        &self.output.reports
    }

    fn seating_rooms(&self) -> &[String] {
        &self.output.seating_rooms
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        self.allocation.on_overflow
    }

    fn bundle(&self) -> bool {
        self.output.bundle
    }

    fn write_plan(&self) -> bool {
        self.output.plan_json
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[session]
name = "Midterms"

[input]
faculty = "data/Faculty.csv"
rooms = "data/RoomCapacity.csv"
students = "data/Students.csv"

[output]
path = "./out"
"#;

    #[test]
    fn test_parse_minimal_config_defaults() {
        let config = TomlConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.session.name, "Midterms");
        assert_eq!(config.faculty_path(), "data/Faculty.csv");
        assert_eq!(config.reports(), ReportKind::ALL.as_slice());
        assert_eq!(config.overflow_policy(), OverflowPolicy::Drop);
        assert!(config.seating_rooms().is_empty());
        assert!(!config.bundle());
        assert!(!config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[session]
name = "Finals"
description = "Semester finals, block A"

[input]
faculty = "Faculty.csv"
rooms = "RoomCapacity.csv"
students = "Students.csv"

[allocation]
on_overflow = "reject"

[output]
path = "./finals"
reports = ["summary", "seating"]
seating_rooms = ["A-101"]
bundle = true
plan_json = true

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.overflow_policy(), OverflowPolicy::Reject);
        assert_eq!(config.reports(), &[ReportKind::Summary, ReportKind::Seating]);
        assert_eq!(config.seating_rooms(), &["A-101".to_string()]);
        assert!(config.bundle());
        assert!(config.write_plan());
        assert!(config.verbose());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("EXAM_SEATING_TEST_OUT", "/tmp/exam-out");

        let toml_content = MINIMAL.replace("./out", "${EXAM_SEATING_TEST_OUT}");
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/exam-out");

        std::env::remove_var("EXAM_SEATING_TEST_OUT");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let toml_content = MINIMAL.replace("./out", "${EXAM_SEATING_SURELY_UNSET}");
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.output_path(), "${EXAM_SEATING_SURELY_UNSET}");
    }

    #[test]
    fn test_config_validation() {
        let bad_input = MINIMAL.replace("data/Students.csv", "data/Students.xlsx");
        let config = TomlConfig::from_toml_str(&bad_input).unwrap();
        assert!(config.validate().is_err());

        let bad_format = format!("{}\n[logging]\nformat = \"xml\"\n", MINIMAL);
        let config = TomlConfig::from_toml_str(&bad_format).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SeatingError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_overflow_policy_fails_to_parse() {
        let toml_content = format!("{}\n[allocation]\non_overflow = \"squeeze\"\n", MINIMAL);
        assert!(matches!(
            TomlConfig::from_toml_str(&toml_content),
            Err(SeatingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.session.name, "Midterms");
    }
}
