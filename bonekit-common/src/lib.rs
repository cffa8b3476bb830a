//! # Bonekit Common
//!
//! Foundational types shared across the Bonekit crates.
//!
//! ## Modules
//!
//! - [`error`] - Shared error type and severity classification
//! - [`logging`] - Tracing setup and log formatting helpers

pub mod error;
pub mod logging;

pub use error::{BonekitError, ErrorChain, ErrorChainExt, ErrorContext, ErrorSeverity, Result, Severity};
pub use logging::{init_tracing, Pretty};
