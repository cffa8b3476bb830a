//! Bone types.
//!
//! The set of bones is closed: [`Bone`] is an enum and every operation is a
//! `match` over its variants. Each variant reads one raw client string into a
//! [`ReadOutcome`] and converts values to and from the stored representation.

pub mod color;
pub mod currency;
pub mod string;
pub mod text;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::read::ReadOutcome;

pub use color::{ColorBone, ColorMode, ColorValueNormalizer};
pub use currency::{CurrencyBone, CurrencyFormat, SymbolPosition, CURRENCY_FORMATS};
pub use string::StringBone;
pub use text::{TextBone, DEFAULT_VALID_ATTRS, DEFAULT_VALID_TAGS};

/// Semantic check run on a value that passed structural validation.
/// Returns a human-readable reason to reject it.
pub type Validator = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Options shared by all bone types.
#[derive(Clone, Default)]
pub struct BoneOptions {
    /// Label shown to users.
    pub descr: Option<String>,
    /// Read-only bones ignore client submissions.
    pub read_only: bool,
    /// Required bones block a submission when missing or empty.
    pub required: bool,
    validator: Option<Validator>,
}

impl BoneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descr(mut self, descr: impl Into<String>) -> Self {
        self.descr = Some(descr.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }

    /// Run the semantic check, if one is configured.
    pub fn is_invalid(&self, value: &Value) -> Option<String> {
        self.validator.as_ref().and_then(|check| check(value))
    }
}

impl fmt::Debug for BoneOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoneOptions")
            .field("descr", &self.descr)
            .field("read_only", &self.read_only)
            .field("required", &self.required)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A typed field descriptor within a skeleton.
#[derive(Debug, Clone)]
pub enum Bone {
    String(StringBone),
    Text(TextBone),
    Color(ColorBone),
    Currency(CurrencyBone),
}

impl Bone {
    /// Type name as exposed to clients.
    pub fn type_name(&self) -> &'static str {
        match self {
            Bone::String(_) => "str",
            Bone::Text(_) => "text",
            Bone::Color(_) => "color",
            Bone::Currency(_) => "numeric.currency",
        }
    }

    pub fn options(&self) -> &BoneOptions {
        match self {
            Bone::String(b) => &b.options,
            Bone::Text(b) => &b.options,
            Bone::Color(b) => &b.options,
            Bone::Currency(b) => &b.options,
        }
    }

    /// Validate one raw submitted value.
    pub fn from_client(&self, raw: Option<&str>) -> ReadOutcome<Value> {
        match self {
            Bone::String(b) => b.from_client(raw),
            Bone::Text(b) => b.from_client(raw),
            Bone::Color(b) => b.from_client(raw),
            Bone::Currency(b) => b.from_client(raw),
        }
    }

    /// Convert an in-memory value to its stored form.
    pub fn serialize(&self, value: &Value) -> Value {
        match self {
            Bone::Currency(b) => b.serialize(value),
            Bone::String(_) | Bone::Text(_) | Bone::Color(_) => match value {
                Value::String(_) => value.clone(),
                _ => Value::Null,
            },
        }
    }

    /// Convert a stored value back into its in-memory form.
    pub fn unserialize(&self, stored: &Value) -> Value {
        match self {
            Bone::String(b) => b.unserialize(stored),
            Bone::Text(b) => b.unserialize(stored),
            Bone::Color(b) => b.unserialize(stored),
            Bone::Currency(b) => b.unserialize(stored),
        }
    }

    /// Human-readable rendering of a value.
    pub fn display(&self, value: &Value) -> String {
        match self {
            Bone::Currency(b) => b.display(value),
            Bone::String(_) | Bone::Text(_) | Bone::Color(_) => {
                value.as_str().unwrap_or_default().to_string()
            }
        }
    }
}

impl From<StringBone> for Bone {
    fn from(bone: StringBone) -> Self {
        Bone::String(bone)
    }
}

impl From<TextBone> for Bone {
    fn from(bone: TextBone) -> Self {
        Bone::Text(bone)
    }
}

impl From<ColorBone> for Bone {
    fn from(bone: ColorBone) -> Self {
        Bone::Color(bone)
    }
}

impl From<CurrencyBone> for Bone {
    fn from(bone: CurrencyBone) -> Self {
        Bone::Currency(bone)
    }
}
