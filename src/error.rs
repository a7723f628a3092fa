use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("TransportError: {0}")]
    Transport(#[from] TransportError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ResponseError: {0}")]
    Response(#[from] ResponseError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{message}. {hint}")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Rejected before any request is built. Never retried.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Condition column name is empty")]
    EmptyColumn,
    #[error("Unknown operator: {name}")]
    UnknownOperator { name: String },
    #[error("Operator {operator} does not accept {kind} values (column '{column}')")]
    IncompatibleValue {
        column: String,
        operator: String,
        kind: String,
    },
    #[error("Non-finite number for column '{column}'")]
    NonFiniteNumber { column: String },
    #[error("Condition set must contain at least one condition")]
    EmptyConditionSet,
    #[error("Unknown mode: {name}")]
    UnknownMode { name: String },
    #[error("Unknown sort direction: {name}")]
    UnknownDirection { name: String },
    #[error("Malformed order_by segment '{segment}' (expected column:asc|desc)")]
    MalformedOrderBy { segment: String },
    #[error("Limit must be greater than zero")]
    InvalidLimit,
    #[error("Select list is empty or contains a blank column name")]
    EmptyMetrics,
    #[error("Unknown report: {name}")]
    UnknownReport { name: String },
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP client initialization failed: {message}")]
    Init { message: String },
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("HTTP error: {status}")]
    Http { status: u16, body: String },
}

/// Error reported by the API inside an otherwise successful response.
/// The server message is preserved verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("API error{}: {message}", code_suffix(.code))]
pub struct ApiError {
    pub code: Option<i64>,
    pub message: String,
}

fn code_suffix(code: &Option<i64>) -> String {
    match code {
        Some(code) => format!(" (code {code})"),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Response body is not valid JSON: {message}")]
    Parse { message: String },
    #[error("Response is missing result key '{key}'")]
    MissingKey { key: String },
    #[error("Unexpected response shape under '{key}'")]
    UnexpectedShape { key: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Medium,
            AppError::Transport(transport_error) => match transport_error {
                TransportError::Timeout { .. } => ErrorSeverity::Medium,
                TransportError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                TransportError::Http { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            AppError::Api(_) => ErrorSeverity::High,
            AppError::Response(_) => ErrorSeverity::Medium,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Transport(TransportError::Http { status, .. }) => {
                format!("The API responded with HTTP {}", status)
            }
            AppError::Transport(TransportError::Timeout { timeout_secs }) => {
                format!("The API did not respond within {}s", timeout_secs)
            }
            AppError::Api(api_error) => format!("{}", api_error),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(_) => {
                Some("'ahr-cli auth login' to store a valid API token".to_string())
            }
            AppError::Transport(
                TransportError::Timeout { .. } | TransportError::Network { .. },
            ) => Some("Check your internet connection and try again".to_string()),
            AppError::Validation(ValidationError::UnknownReport { .. }) => {
                Some("'ahr-cli report list' to see available reports".to_string())
            }
            AppError::Validation(ValidationError::UnknownOperator { .. }) => Some(
                "Operators: EQUALS, NOT_EQUALS, CONTAINS, NOT_CONTAINS, GREATER_THAN, LESS_THAN, \
                 GREATER_OR_EQUAL, LESS_OR_EQUAL, STARTS_WITH, ENDS_WITH"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::UnknownOperator {
            name: "BOGUS_OP".to_string(),
        };
        assert_eq!(format!("{}", err), "Unknown operator: BOGUS_OP");

        let err = ValidationError::IncompatibleValue {
            column: "anchor".to_string(),
            operator: "GREATER_THAN".to_string(),
            kind: "text".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Operator GREATER_THAN does not accept text values (column 'anchor')"
        );

        let err = ValidationError::MalformedOrderBy {
            segment: "bad".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Malformed order_by segment 'bad' (expected column:asc|desc)"
        );

        assert_eq!(
            format!("{}", ValidationError::EmptyConditionSet),
            "Condition set must contain at least one condition"
        );
        assert_eq!(
            format!("{}", ValidationError::InvalidLimit),
            "Limit must be greater than zero"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Timeout { timeout_secs: 30 };
        assert_eq!(format!("{}", err), "Request timed out after 30s");

        let err = TransportError::Http {
            status: 500,
            body: "internal error".to_string(),
        };
        assert!(matches!(err, TransportError::Http { status: 500, .. }));
        assert_eq!(format!("{}", err), "HTTP error: 500");

        let err = TransportError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{}", err), "Network error: connection refused");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError {
            code: Some(5),
            message: "invalid token".to_string(),
        };
        assert_eq!(format!("{}", err), "API error (code 5): invalid token");

        let err = ApiError {
            code: None,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(format!("{}", err), "API error: quota exceeded");
    }

    #[test]
    fn test_response_error_display() {
        let err = ResponseError::MissingKey {
            key: "refdomains".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Response is missing result key 'refdomains'"
        );

        let err = ResponseError::Parse {
            message: "expected value at line 1".to_string(),
        };
        assert!(matches!(err, ResponseError::Parse { .. }));
    }

    #[test]
    fn test_app_error_display_validation() {
        let app_err = AppError::Validation(ValidationError::EmptyConditionSet);
        assert_eq!(
            format!("{}", app_err),
            "ValidationError: Condition set must contain at least one condition"
        );
        assert!(matches!(
            app_err,
            AppError::Validation(ValidationError::EmptyConditionSet)
        ));
    }

    #[test]
    fn test_app_error_display_transport() {
        let app_err = AppError::Transport(TransportError::Http {
            status: 503,
            body: "unavailable".to_string(),
        });
        assert_eq!(format!("{}", app_err), "TransportError: HTTP error: 503");
        if let AppError::Transport(TransportError::Http { status, body }) = app_err {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
    }

    #[test]
    fn test_severity_levels() {
        let app_err = AppError::Api(ApiError {
            code: None,
            message: "invalid token".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Transport(TransportError::Http {
            status: 503,
            body: String::new(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Transport(TransportError::Http {
            status: 404,
            body: String::new(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);

        let app_err = AppError::Validation(ValidationError::InvalidLimit);
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_display_friendly_and_hints() {
        let app_err = AppError::Transport(TransportError::Http {
            status: 500,
            body: "<html>oops</html>".to_string(),
        });
        assert_eq!(app_err.display_friendly(), "The API responded with HTTP 500");

        let app_err = AppError::Api(ApiError {
            code: Some(5),
            message: "invalid token".to_string(),
        });
        assert_eq!(
            app_err.display_friendly(),
            "API error (code 5): invalid token"
        );
        assert_eq!(
            app_err.troubleshooting_hint(),
            Some("'ahr-cli auth login' to store a valid API token".to_string())
        );

        let app_err = AppError::Validation(ValidationError::UnknownReport {
            name: "nope".to_string(),
        });
        assert_eq!(
            app_err.troubleshooting_hint(),
            Some("'ahr-cli report list' to see available reports".to_string())
        );
    }

    #[test]
    fn test_severity_emoji() {
        assert_eq!(ErrorSeverity::Critical.emoji(), "🚨");
        assert_eq!(ErrorSeverity::High.emoji(), "❌");
        assert_eq!(ErrorSeverity::Medium.emoji(), "⚠️");
        assert_eq!(ErrorSeverity::Low.emoji(), "ℹ️");
    }
}
