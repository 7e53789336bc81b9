use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),


    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Command `{command}` exited with code {code:?}: {stderr}")]
    CommandError {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{url} returned HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("No data: {message}")]
    NoDataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Command,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OpsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpsError::HttpError(_) | OpsError::UnexpectedStatus { .. } => ErrorCategory::Network,
            OpsError::CommandError { .. } => ErrorCategory::Command,
            OpsError::ConfigValidationError { .. }
            | OpsError::InvalidConfigValueError { .. }
            | OpsError::ValidationError { .. } => ErrorCategory::Configuration,
            OpsError::NoDataError { .. } => ErrorCategory::Data,
            OpsError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Command | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OpsError::HttpError(e) if e.is_timeout() => {
                "The repository did not answer in time; check that the target is up and reachable"
            }
            OpsError::HttpError(_) => "Check network connectivity and the --target / --base-url values",
            OpsError::UnexpectedStatus { .. } => {
                "Inspect the repository logs; the endpoint answered but not with the expected status"
            }
            OpsError::CommandError { .. } => {
                "Run the invenio command by hand inside the instance container to see the full error"
            }
            OpsError::ConfigValidationError { .. } | OpsError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
            OpsError::ValidationError { .. } => "Correct the input value and try again",
            OpsError::NoDataError { .. } => {
                "Upload test data (e.g. the 'Najd' book with HOCR) to the target environment"
            }
            OpsError::IoError(_) => "Check file permissions and that required programs are on PATH",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OpsError::HttpError(e) => format!("Could not reach the repository: {}", e),
            OpsError::CommandError { command, .. } => {
                format!("The management command `{}` failed", command)
            }
            other => other.to_string(),
        }
    }

    /// Logs the error with its classification and echoes a short form on stderr.
    pub fn report(&self, context: &str) {
        tracing::error!(
            "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
            context,
            self,
            self.category(),
            self.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        eprintln!("❌ {}", self.user_friendly_message());
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
