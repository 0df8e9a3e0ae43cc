//! Error types for planfold
//!
//! Every failure is a [`PlanError`] carrying one [`ErrorCode`] and an optional
//! causal chain, so callers branch on the code rather than the message.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using [`PlanError`]
pub type Result<T> = std::result::Result<T, PlanError>;

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    MissingConfig,
    SkillNotFound,
    FileReadError,
    FileWriteError,
    NetworkError,
    ApiError,
    ParseError,
    CircularReference,
    InvalidState,
    ConfigCorruption,
}

/// How a failure should be handled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Surface to the user for remediation.
    UserRecoverable,
    /// Raised by an external collaborator (filesystem, network, parser).
    System,
    /// Abort the current resolution pass.
    Fatal,
}

impl ErrorCode {
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::InvalidInput | Self::MissingConfig | Self::SkillNotFound => {
                Severity::UserRecoverable
            }
            Self::FileReadError
            | Self::FileWriteError
            | Self::NetworkError
            | Self::ApiError
            | Self::ParseError => Severity::System,
            Self::CircularReference | Self::InvalidState | Self::ConfigCorruption => {
                Severity::Fatal
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::MissingConfig => "missing_config",
            Self::SkillNotFound => "skill_not_found",
            Self::FileReadError => "file_read_error",
            Self::FileWriteError => "file_write_error",
            Self::NetworkError => "network_error",
            Self::ApiError => "api_error",
            Self::ParseError => "parse_error",
            Self::CircularReference => "circular_reference",
            Self::InvalidState => "invalid_state",
            Self::ConfigCorruption => "config_corruption",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for planfold
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct PlanError {
    pub message: String,
    pub code: ErrorCode,
    #[source]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<PlanError>>,
}

impl PlanError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Self) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingConfig, message)
    }

    pub fn skill_not_found(name: &str) -> Self {
        Self::new(ErrorCode::SkillNotFound, format!("Skill not found: {name}"))
    }

    pub fn file_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileReadError, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Cycle through `chain`, rendered in visiting order.
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::new(
            ErrorCode::CircularReference,
            format!("Circular skill reference detected: {}", chain.join(" → ")),
        )
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    pub fn config_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigCorruption, message)
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.code.severity()
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Iterate this error and its causes, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |err| err.cause.as_deref())
    }
}

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        Self::file_read(err.to_string())
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(format!("invalid JSON: {err}"))
    }
}

impl From<toml::de::Error> for PlanError {
    fn from(err: toml::de::Error) -> Self {
        Self::parse(format!("invalid TOML: {err}"))
    }
}

impl From<serde_yaml::Error> for PlanError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(format!("invalid YAML: {err}"))
    }
}
