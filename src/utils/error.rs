use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeatingError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid {table} data: {message}")]
    DataShapeError { table: String, message: String },

    #[error("{table} table is missing required column '{column}'")]
    MissingColumnError { table: String, column: String },

    #[error("{unseated} student(s) exceed the total room capacity of {total_capacity}")]
    CapacityOverflowError {
        unseated: usize,
        total_capacity: usize,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    Capacity,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SeatingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::DataShapeError { .. } | Self::MissingColumnError { .. } => {
                ErrorCategory::InputData
            }
            Self::CapacityOverflowError { .. } => ErrorCategory::Capacity,
            Self::ZipError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Capacity => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingColumnError { table, column } => {
                format!("The {} file has no '{}' column", table, column)
            }
            Self::DataShapeError { table, message } => {
                format!("The {} file could not be read: {}", table, message)
            }
            Self::CsvError(e) => format!("A CSV file could not be parsed: {}", e),
            Self::ConfigurationError { message } => format!("Cannot build a seating plan: {}", message),
            Self::CapacityOverflowError {
                unseated,
                total_capacity,
            } => format!(
                "{} student(s) could not be seated; rooms only hold {}",
                unseated, total_capacity
            ),
            Self::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingColumnError { .. } => {
                "Check the header row: faculty needs 'Faculty', rooms need 'Room No' and 'Capacity'"
            }
            Self::DataShapeError { .. } | Self::CsvError(_) => {
                "Fix the offending row; capacities must be positive whole numbers"
            }
            Self::ConfigurationError { .. } => {
                "Provide at least one room and at least one invigilator"
            }
            Self::CapacityOverflowError { .. } => {
                "Add rooms or raise capacities, or run with --on-overflow drop"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigValidationError { .. } => "Review the command line flags or TOML file",
            Self::IoError(_) | Self::ZipError(_) | Self::SerializationError(_) => {
                "Check that input files exist and the output directory is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SeatingError>;
