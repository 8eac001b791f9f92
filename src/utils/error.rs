use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown cable_type: {name} (available: {available})")]
    UnknownCable { name: String, available: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SimError {
    pub fn unknown_cable<I, S>(name: &str, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available = available
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        SimError::UnknownCable {
            name: name.to_string(),
            available,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::UnknownCable { .. } => ErrorCategory::Catalog,
            SimError::ConfigError { .. }
            | SimError::ConfigValidationError { .. }
            | SimError::InvalidConfigValueError { .. }
            | SimError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SimError::ValidationError { .. } => ErrorCategory::Input,
            SimError::IoError(_) | SimError::CsvError(_) | SimError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SimError::ValidationError { .. } => ErrorSeverity::Medium,
            SimError::UnknownCable { .. }
            | SimError::ConfigError { .. }
            | SimError::ConfigValidationError { .. }
            | SimError::InvalidConfigValueError { .. }
            | SimError::MissingConfigError { .. } => ErrorSeverity::High,
            SimError::IoError(_) | SimError::CsvError(_) | SimError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SimError::UnknownCable { available, .. } => {
                format!("Pick one of the catalog cables: {}", available)
            }
            SimError::ConfigError { .. } | SimError::ConfigValidationError { .. } => {
                "Check the TOML file syntax and section names".to_string()
            }
            SimError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and retry", field)
            }
            SimError::MissingConfigError { field } => {
                format!("Add the '{}' field to the configuration", field)
            }
            SimError::ValidationError { .. } => "Adjust the input parameters".to_string(),
            SimError::IoError(_) => "Check that the path exists and is writable".to_string(),
            SimError::CsvError(_) | SimError::SerializationError(_) => {
                "Retry with a different output format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Catalog => format!("Cable lookup failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
