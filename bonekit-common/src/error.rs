//! Error types for Bonekit Common
//!
//! This module provides the shared error type and the severity classification
//! used by every Bonekit crate. Validation outcomes for client input are
//! ordinary values in `bonekit-bones`; the types here cover infrastructure
//! failures such as storage, configuration and serialization.

use std::fmt;
use std::io;
use thiserror::Error as ThisError;

/// Severity levels for error classification
///
/// These levels help categorize errors by their impact and urgency, enabling
/// appropriate handling, logging, and user notification strategies.
///
/// # Severity Levels
///
/// - **Warning**: Potential issue but operation can proceed.
/// - **Error**: Operation failed but the system can continue.
/// - **Critical**: System cannot continue, requires immediate attention.
///
/// # Examples
///
/// ```rust
/// use bonekit_common::ErrorSeverity;
///
/// // Warning: a module index entry could not be found
/// let missing = ErrorSeverity::Warning;
///
/// // Critical: the datastore rejected a write
/// let storage = ErrorSeverity::Critical;
///
/// assert!(missing < storage);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but system can continue
    ///
    /// # Examples
    /// - Malformed configuration value
    /// - Entity payload that does not deserialize
    Error,

    /// System cannot continue, requires immediate attention
    ///
    /// # Examples
    /// - Datastore unavailable
    /// - Skeleton kind missing from the registry at startup
    Critical,
}

/// Trait for error types that have severity levels
///
/// All Bonekit error types implement this trait so callers can pick a log
/// level and decide whether to abort a request or a startup task.
///
/// # Example
///
/// ```rust
/// use bonekit_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum StoreError {
///     Unavailable,
///     Missing,
/// }
///
/// impl Severity for StoreError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             StoreError::Unavailable => ErrorSeverity::Critical,
///             StoreError::Missing => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(StoreError::Unavailable.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Result type alias for Bonekit operations
pub type Result<T> = std::result::Result<T, BonekitError>;

/// Common error types for Bonekit operations
///
/// Domain-specific errors are defined in their respective crates and
/// converted to these common types where they cross crate boundaries.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum BonekitError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored entity was not found
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Entity kind that was looked up
        kind: String,
        /// Key name that was looked up
        name: String,
    },

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// The error message providing context
        message: String,
        #[source]
        /// The underlying error that caused this error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

impl BonekitError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a not found error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a new other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, BonekitError::NotFound { .. })
    }
}

impl Severity for BonekitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BonekitError::Storage(_) => ErrorSeverity::Critical,

            BonekitError::Io(_) => ErrorSeverity::Error,
            BonekitError::Serialization(_) => ErrorSeverity::Error,
            BonekitError::Json(_) => ErrorSeverity::Error,
            BonekitError::Context { .. } => ErrorSeverity::Error,
            BonekitError::Other { .. } => ErrorSeverity::Error,

            BonekitError::NotFound { .. } => ErrorSeverity::Warning,
        }
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| BonekitError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| BonekitError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            writeln!(f, "{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}
