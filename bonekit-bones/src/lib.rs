//! Bones and skeletons
//!
//! `bonekit-bones` defines the typed field descriptors ("bones") that make up a
//! data model, and the skeletons that group them into one datastore kind.
//!
//! # Architecture
//!
//! - **Closed bone set**: [`Bone`] is an enum over string, text, color and currency bones
//! - **Four-way client reads**: every bone reads raw input into a [`ReadOutcome`]
//! - **Canonical colors**: [`ColorValueNormalizer`] accepts `#rgb`, `#rrggbb` and `#rrggbbaa` forms
//! - **Pluggable storage**: skeletons persist through the async [`Datastore`] trait

pub mod bones;
pub mod datastore;
pub mod error;
pub mod read;
pub mod skeleton;

pub use bones::{
    Bone, BoneOptions, ColorBone, ColorMode, ColorValueNormalizer, CurrencyBone, CurrencyFormat,
    StringBone, SymbolPosition, TextBone, Validator,
};
pub use datastore::{Datastore, Entity, Key, MemoryDatastore};
pub use error::{BonesError, Result};
pub use read::{
    field_path, ClientData, ReadFromClientError, ReadFromClientErrorSeverity, ReadOutcome,
};
pub use skeleton::{
    FromClientReport, SkeletonDef, SkeletonDefBuilder, SkeletonInstance, SkeletonRegistry,
    CHANGEDATE,
};
