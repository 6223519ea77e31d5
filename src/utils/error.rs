use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File {path} is not valid UTF-8: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::DecodeError { .. } => ErrorSeverity::Low,
            EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::TomlError(_)
            | EtlError::CsvError(_)
            | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::WalkError(_) => ErrorSeverity::Medium,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 退出碼，依嚴重程度決定
    pub fn exit_code(&self) -> u8 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::WalkError(_) => "Check that the components path exists and is readable",
            EtlError::IoError(_) => "Check file permissions and available disk space",
            EtlError::DecodeError { .. } => "Re-save the component file with UTF-8 encoding",
            EtlError::TomlError(_) => "Fix the configuration file syntax and try again",
            EtlError::InvalidConfigValueError { .. } | EtlError::MissingConfigError { .. } => {
                "Review the configuration values passed on the command line or in the config file"
            }
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Make sure the output directory is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::WalkError(e) => format!("Could not scan components: {}", e),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            EtlError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
