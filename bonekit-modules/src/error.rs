//! Error types for module handling

use bonekit_bones::BonesError;
use bonekit_common::{BonekitError, ErrorSeverity, Severity};
use thiserror::Error;

use crate::tree::ModuleId;

/// Result type for module operations
pub type Result<T> = std::result::Result<T, ModulesError>;

/// Errors raised while building module trees or maintaining the module index
#[derive(Debug, Error)]
pub enum ModulesError {
    /// Module id that does not belong to the tree
    #[error("unknown module id: {id}")]
    UnknownModule { id: ModuleId },

    /// Child name already used under the same parent
    #[error("module '{parent}' already has a child named '{name}'")]
    DuplicateChild { parent: String, name: String },

    /// Child name that cannot be part of a dotted module path
    #[error("invalid module name: {name:?}")]
    InvalidName { name: String },

    /// Skeleton or bone failure
    #[error(transparent)]
    Bones(#[from] BonesError),

    /// Datastore or other shared infrastructure failure
    #[error(transparent)]
    Common(#[from] BonekitError),
}

impl Severity for ModulesError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ModulesError::UnknownModule { .. } => ErrorSeverity::Error,
            ModulesError::DuplicateChild { .. } => ErrorSeverity::Error,
            ModulesError::InvalidName { .. } => ErrorSeverity::Error,
            ModulesError::Bones(err) => err.severity(),
            ModulesError::Common(err) => err.severity(),
        }
    }
}
