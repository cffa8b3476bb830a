//! Outcomes of reading one bone value from submitted client data.
//!
//! A bone never raises for bad input. It classifies the submission into one
//! of four [`ReadOutcome`]s, and the skeleton turns the non-valid ones into
//! [`ReadFromClientError`]s keyed by field path.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Submitted form data: field name to raw string value.
pub type ClientData = HashMap<String, String>;

/// Message for a field that was not part of the submission.
pub const MSG_NOT_SUBMITTED: &str = "Field not submitted";

/// Message for a field that was submitted without a value.
pub const MSG_EMPTY: &str = "No value selected";

/// Message for a value that failed structural validation.
pub const MSG_INVALID: &str = "Invalid value entered";

/// How serious a client read problem is, in order of increasing concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadFromClientErrorSeverity {
    /// The field was absent; the stored value is untouched.
    NotSet,
    /// The field was explicitly emptied; the stored value was cleared.
    Empty,
    /// The value was rejected; the stored value is untouched.
    Invalid,
}

impl fmt::Display for ReadFromClientErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotSet => "not-set",
            Self::Empty => "empty",
            Self::Invalid => "invalid",
        })
    }
}

/// A user-facing problem with one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFromClientError {
    pub severity: ReadFromClientErrorSeverity,
    /// `prefix.name` for nested skeletons, otherwise the bone name.
    pub field_path: String,
    pub message: String,
}

impl ReadFromClientError {
    pub fn new(
        severity: ReadFromClientErrorSeverity,
        field_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ReadFromClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field_path, self.severity, self.message)
    }
}

/// Result of validating one submitted value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The field key was absent from the submission.
    NotSubmitted,
    /// The field was present but empty. The stored value must be cleared.
    Empty,
    /// The value was rejected for the given reason. The stored value must be
    /// left unchanged.
    Invalid(String),
    /// The value was accepted in canonical form.
    Valid(T),
}

impl<T> ReadOutcome<T> {
    /// Shorthand for the structural rejection every bone shares.
    pub fn invalid() -> Self {
        Self::Invalid(MSG_INVALID.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ReadOutcome<U> {
        match self {
            Self::NotSubmitted => ReadOutcome::NotSubmitted,
            Self::Empty => ReadOutcome::Empty,
            Self::Invalid(reason) => ReadOutcome::Invalid(reason),
            Self::Valid(value) => ReadOutcome::Valid(f(value)),
        }
    }

    /// Severity reported to the caller, `None` for an accepted value.
    pub fn severity(&self) -> Option<ReadFromClientErrorSeverity> {
        match self {
            Self::NotSubmitted => Some(ReadFromClientErrorSeverity::NotSet),
            Self::Empty => Some(ReadFromClientErrorSeverity::Empty),
            Self::Invalid(_) => Some(ReadFromClientErrorSeverity::Invalid),
            Self::Valid(_) => None,
        }
    }

    /// The error to surface for this outcome, if any.
    pub fn to_error(&self, field_path: &str) -> Option<ReadFromClientError> {
        let (severity, message) = match self {
            Self::NotSubmitted => (ReadFromClientErrorSeverity::NotSet, MSG_NOT_SUBMITTED),
            Self::Empty => (ReadFromClientErrorSeverity::Empty, MSG_EMPTY),
            Self::Invalid(reason) => (ReadFromClientErrorSeverity::Invalid, reason.as_str()),
            Self::Valid(_) => return None,
        };
        Some(ReadFromClientError::new(severity, field_path, message))
    }
}

/// Build the field path reported in errors.
pub fn field_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{name}"),
        _ => name.to_string(),
    }
}

/// Split off the absent and empty cases every bone handles the same way.
pub(crate) fn present<T>(raw: Option<&str>) -> Result<&str, ReadOutcome<T>> {
    match raw {
        None => Err(ReadOutcome::NotSubmitted),
        Some("") => Err(ReadOutcome::Empty),
        Some(value) => Ok(value),
    }
}
