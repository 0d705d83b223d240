use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request failed with HTTP status {status}")]
    HttpStatusError { status: u16 },

    #[error("Response parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Current location is unavailable: {reason}")]
    LocationUnavailable { reason: String },

    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Location,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::NetworkError(_) | MapError::HttpStatusError { .. } => ErrorCategory::Network,
            MapError::ParseError(_) => ErrorCategory::Data,
            MapError::LocationUnavailable { .. } | MapError::PermissionDenied => {
                ErrorCategory::Location
            }
            MapError::ConfigError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => ErrorCategory::Config,
            MapError::CsvError(_) | MapError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Location | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Single message shown to the user. Network and payload failures read
    /// the same: the request failed.
    /// Process exit status for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MapError::NetworkError(_)
            | MapError::HttpStatusError { .. }
            | MapError::ParseError(_) => {
                "The request for inspection data failed".to_string()
            }
            MapError::PermissionDenied => {
                "Must grant location permission to use this app".to_string()
            }
            MapError::LocationUnavailable { .. } => {
                "Your current location could not be determined".to_string()
            }
            MapError::ConfigError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            MapError::CsvError(_) | MapError::IoError(_) => {
                format!("Could not write map output: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the endpoint URL",
            ErrorCategory::Data => "The data source may have changed its format",
            ErrorCategory::Location => "Provide a location with --latitude and --longitude",
            ErrorCategory::Config => "Review the command-line options or configuration file",
            ErrorCategory::System => "Check that the output path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_and_parse_errors_share_user_message() {
        let status = MapError::HttpStatusError { status: 503 };
        let payload = MapError::ParseError(
            serde_json::from_str::<Vec<serde_json::Value>>("{}").unwrap_err(),
        );

        assert_eq!(status.user_friendly_message(), payload.user_friendly_message());
        assert_eq!(status.category(), ErrorCategory::Network);
        assert_eq!(payload.category(), ErrorCategory::Data);
    }

    #[test]
    fn test_severity_by_category() {
        assert_eq!(
            MapError::HttpStatusError { status: 500 }.severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(MapError::PermissionDenied.severity(), ErrorSeverity::High);
        assert_eq!(
            MapError::IoError(std::io::Error::other("disk full")).severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_every_failure_exits_non_zero() {
        let errors = [
            MapError::HttpStatusError { status: 404 },
            MapError::PermissionDenied,
            MapError::LocationUnavailable {
                reason: "none configured".to_string(),
            },
            MapError::MissingConfigError {
                field: "endpoint".to_string(),
            },
            MapError::IoError(std::io::Error::other("disk full")),
        ];

        let codes: Vec<i32> = errors.iter().map(MapError::exit_code).collect();
        assert_eq!(codes, vec![2, 1, 1, 1, 3]);
    }
}
