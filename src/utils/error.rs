use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Domain '{domain}' not found: {path} is not a directory")]
    DomainNotFound { domain: String, path: String },

    #[error("Domain '{domain}' has no description file at {path}")]
    DomainFileMissing { domain: String, path: String },

    #[error("Cannot read domain '{domain}' at {path}: {source}")]
    CorpusReadError {
        domain: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Result table error: {message}")]
    ResultTableError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Corpus,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl BenchError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::DomainNotFound { .. }
            | Self::DomainFileMissing { .. }
            | Self::CorpusReadError { .. } => ErrorCategory::Corpus,
            Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::ResultTableError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Corpus => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 是否為需要在任何求解器啟動前中止的配置錯誤
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Corpus
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DomainNotFound { path, .. } => format!(
                "Check `benchmarks_dir` and `domains` in the config; expected a directory at {}",
                path
            ),
            Self::DomainFileMissing { path, .. } => format!(
                "Add the domain description at {} or set `domain_file` to the right name",
                path
            ),
            Self::CorpusReadError { path, .. } => {
                format!("Check that {} is readable by the current user", path)
            }
            Self::MissingConfigError { field } => {
                format!("Add `{}` to the configuration file", field)
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of `{}` in the configuration file", field)
            }
            Self::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            Self::CsvError(_) | Self::ResultTableError { .. } => {
                "Check that the result file is a valid comparison CSV".to_string()
            }
            Self::IoError(_) => "Check file permissions and free disk space".to_string(),
            Self::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Corpus => format!("Benchmark corpus problem: {}", self),
            ErrorCategory::Output => format!("Could not handle result table: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
