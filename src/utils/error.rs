use crate::domain::model::Disease;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Please enter valid numerical values for all fields.")]
    InputValidation { invalid_fields: Vec<String> },

    #[error("Expected {expected} values for {disease}, got {actual}")]
    FieldCount {
        disease: Disease,
        expected: usize,
        actual: usize,
    },

    #[error("The {disease} model is not available: {reason}")]
    ModelUnavailable { disease: Disease, reason: String },

    #[error("The {disease} model rejected the input: {message}")]
    ModelInvocation { disease: Disease, message: String },

    #[error("Invalid model artifact {path}: {message}")]
    ArtifactError { path: String, message: String },

    #[error("Unknown disease: {name}")]
    UnknownDisease { name: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Model,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::InputValidation { .. }
            | PredictError::FieldCount { .. }
            | PredictError::UnknownDisease { .. } => ErrorCategory::Input,
            PredictError::ModelUnavailable { .. }
            | PredictError::ModelInvocation { .. }
            | PredictError::ArtifactError { .. } => ErrorCategory::Model,
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            PredictError::IoError(_)
            | PredictError::SerializationError(_)
            | PredictError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Model => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictError::InputValidation { invalid_fields } if !invalid_fields.is_empty() => {
                format!("{} (invalid: {})", self, invalid_fields.join(", "))
            }
            PredictError::ArtifactError { path, .. } => {
                format!("Model file {} could not be read", path)
            }
            PredictError::IoError(e) => format!("File system error: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictError::InputValidation { .. } => {
                "Fill in every field with a plain number such as 120 or 25.5"
            }
            PredictError::FieldCount { .. } => {
                "Run `disease-predict models` to see the fields each form expects"
            }
            PredictError::ModelUnavailable { .. } | PredictError::ArtifactError { .. } => {
                "Check --model-dir / [models] base_path and that the model file is valid JSON"
            }
            PredictError::ModelInvocation { .. } => {
                "The model file does not match this form; re-export it with the expected features"
            }
            PredictError::UnknownDisease { .. } => "Use one of: diabetes, heart, parkinsons",
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValue { .. } => {
                "Fix the configuration value and try again"
            }
            PredictError::IoError(_) => "Check that the file exists and is readable",
            PredictError::SerializationError(_) | PredictError::CsvError(_) => {
                "Check the input file format"
            }
        }
    }

    /// 對應 HTTP 狀態碼的錯誤類別字串
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::InputValidation { .. } => "input_validation",
            PredictError::FieldCount { .. } => "field_count",
            PredictError::ModelUnavailable { .. } => "model_unavailable",
            PredictError::ModelInvocation { .. } => "model_invocation",
            PredictError::ArtifactError { .. } => "artifact",
            PredictError::UnknownDisease { .. } => "unknown_disease",
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValue { .. } => {
                "configuration"
            }
            PredictError::IoError(_)
            | PredictError::SerializationError(_)
            | PredictError::CsvError(_) => "system",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_validation_message() {
        let err = PredictError::InputValidation {
            invalid_fields: vec!["Glucose".to_string(), "BMI".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Please enter valid numerical values for all fields."
        );
        assert!(err.user_friendly_message().contains("Glucose, BMI"));
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_model_errors_are_high_severity() {
        let err = PredictError::ModelUnavailable {
            disease: Disease::Parkinsons,
            reason: "file not found".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.kind(), "model_unavailable");
    }
}
