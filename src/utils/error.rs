use thiserror::Error;

pub const CREATE_OPERATION: &str = "Error creating authorization";
pub const LIST_OPERATION: &str = "Error retrieving list of authorizations";
pub const DELETE_OPERATION: &str = "Error deleting authorization";

#[derive(Error, Debug)]
pub enum AuthzError {
    #[error("{operation}: {message}")]
    RemoteCall {
        operation: &'static str,
        message: String,
    },

    #[error(
        "Please make sure the ID is in the form account_id:region (i.e. 123456789012:us-east-1), got '{id}'"
    )]
    MalformedIdentifier { id: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Identifier,
    Input,
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

impl ErrorSeverity {
    /// Process exit code for the CLI. `Low` is a warning and exits 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AuthzError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        AuthzError::RemoteCall {
            operation,
            message: message.into(),
        }
    }

    pub fn malformed_id(id: impl Into<String>) -> Self {
        AuthzError::MalformedIdentifier { id: id.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthzError::RemoteCall { .. } => ErrorCategory::Remote,
            AuthzError::MalformedIdentifier { .. } => ErrorCategory::Identifier,
            AuthzError::Validation { .. } | AuthzError::MissingField { .. } => ErrorCategory::Input,
            AuthzError::Config { .. } => ErrorCategory::Configuration,
            AuthzError::Io(_) | AuthzError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Identifier | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuthzError::RemoteCall { .. } => {
                "Check AWS credentials, region and network access to the Config service, then retry"
            }
            AuthzError::MalformedIdentifier { .. } => {
                "Use an identifier of the form account_id:region, e.g. 123456789012:us-east-1"
            }
            AuthzError::Validation { .. } => "Fix the highlighted value and run the command again",
            AuthzError::MissingField { .. } => "Provide every required attribute",
            AuthzError::Config { .. } => "Check the configuration file and command line flags",
            AuthzError::Io(_) => "Check that the file exists and is readable",
            AuthzError::Serialization(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuthzError::RemoteCall { operation, message } => {
                format!("AWS Config call failed ({operation}): {message}")
            }
            AuthzError::MalformedIdentifier { id } => {
                format!("'{id}' is not a valid authorization ID")
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthzError>;
