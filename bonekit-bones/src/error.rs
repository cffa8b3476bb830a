//! Error types for bones and skeletons
//!
//! These cover programming and storage failures. Rejected client input is not
//! an error; it is a [`ReadOutcome`](crate::ReadOutcome).

use bonekit_common::{BonekitError, ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for bone and skeleton operations
pub type Result<T> = std::result::Result<T, BonesError>;

/// Errors that can occur while defining or persisting skeletons
#[derive(Debug, Error)]
pub enum BonesError {
    /// Color bone mode other than `rgb` or `rgba`
    #[error("invalid color mode: {mode} (expected rgb or rgba)")]
    InvalidColorMode { mode: String },

    /// Skeleton kind not present in the registry
    #[error("unknown skeleton kind: {kind}")]
    UnknownKind { kind: String },

    /// Skeleton kind registered twice
    #[error("skeleton kind already registered: {kind}")]
    DuplicateKind { kind: String },

    /// Bone name not defined on the skeleton
    #[error("skeleton '{kind}' has no bone named '{name}'")]
    UnknownBone { kind: String, name: String },

    /// Bone name used twice in one skeleton definition
    #[error("duplicate bone name: {name}")]
    DuplicateBone { name: String },

    /// Bone name that collides with skeleton metadata
    #[error("bone name is reserved: {name}")]
    ReservedBoneName { name: String },

    /// Skeleton written without a key
    #[error("skeleton '{kind}' has no key")]
    MissingKey { kind: String },

    /// Entity loaded into a skeleton of another kind
    #[error("entity kind '{found}' does not match skeleton kind '{expected}'")]
    KindMismatch { expected: String, found: String },

    /// Datastore or other shared infrastructure failure
    #[error(transparent)]
    Common(#[from] BonekitError),
}

impl Severity for BonesError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BonesError::InvalidColorMode { .. } => ErrorSeverity::Critical,
            BonesError::DuplicateKind { .. } => ErrorSeverity::Critical,
            BonesError::DuplicateBone { .. } => ErrorSeverity::Critical,
            BonesError::ReservedBoneName { .. } => ErrorSeverity::Critical,

            BonesError::UnknownKind { .. } => ErrorSeverity::Error,
            BonesError::UnknownBone { .. } => ErrorSeverity::Error,
            BonesError::MissingKey { .. } => ErrorSeverity::Error,
            BonesError::KindMismatch { .. } => ErrorSeverity::Error,

            BonesError::Common(inner) => inner.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BonesError::InvalidColorMode {
            mode: "hsl".into(),
        };
        assert_eq!(err.to_string(), "invalid color mode: hsl (expected rgb or rgba)");
    }

    #[test]
    fn test_common_error_keeps_severity() {
        let err: BonesError = BonekitError::storage("unavailable").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "Storage error: unavailable");

        let err: BonesError = BonekitError::not_found("module-conf", "user").into();
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_unknown_bone() {
        let err = BonesError::UnknownBone {
            kind: "module-conf".into(),
            name: "colour".into(),
        };
        assert!(err.to_string().contains("colour"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
