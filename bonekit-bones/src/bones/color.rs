//! Color bone and its value normalizer.
//!
//! Submitted colors are stored as `#` followed by 6 (rgb) or 8 (rgba)
//! lower-case hex digits. rgb mode also accepts the 3-digit shorthand, with
//! or without the leading `#`, and expands it by duplicating each digit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BoneOptions;
use crate::error::BonesError;
use crate::read::{present, ReadOutcome};

/// Characters a color value may contain after lower-casing.
const ALPHABET: &str = "#0123456789abcdef";

/// Whether the alpha channel is part of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Hex digits in the canonical form, without the `#`.
    pub fn digits(self) -> usize {
        match self {
            ColorMode::Rgb => 6,
            ColorMode::Rgba => 8,
        }
    }
}

impl FromStr for ColorMode {
    type Err = BonesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(ColorMode::Rgb),
            "rgba" => Ok(ColorMode::Rgba),
            other => Err(BonesError::InvalidColorMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Rgb => "rgb",
            ColorMode::Rgba => "rgba",
        })
    }
}

/// Stateless parser from a submitted color string to its canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorValueNormalizer {
    mode: ColorMode,
}

impl ColorValueNormalizer {
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    /// Build from a mode name; only `rgb` and `rgba` are accepted.
    pub fn from_mode_name(mode: &str) -> Result<Self, BonesError> {
        mode.parse().map(Self::new)
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Validate and normalize without an extra semantic check.
    pub fn validate_and_normalize(&self, raw: Option<&str>) -> ReadOutcome<String> {
        self.validate_and_normalize_with(raw, |_| None)
    }

    /// Validate and normalize, then pass the canonical candidate to
    /// `is_invalid`. A returned reason rejects the value.
    pub fn validate_and_normalize_with<F>(&self, raw: Option<&str>, is_invalid: F) -> ReadOutcome<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let raw = match present(raw) {
            Ok(raw) => raw,
            Err(outcome) => return outcome,
        };

        let value = raw.to_lowercase();
        if value.matches('#').count() > 1 {
            return ReadOutcome::invalid();
        }
        if !value.chars().all(|c| ALPHABET.contains(c)) {
            return ReadOutcome::invalid();
        }

        let Some(candidate) = self.canonical(&value) else {
            return ReadOutcome::invalid();
        };

        match is_invalid(&candidate) {
            Some(reason) => ReadOutcome::Invalid(reason),
            None => ReadOutcome::Valid(candidate),
        }
    }

    /// Shape a lower-cased value with at most one `#` into canonical form.
    fn canonical(&self, value: &str) -> Option<String> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        // A `#` that is not leading cannot be part of a color.
        if digits.contains('#') {
            return None;
        }

        match (self.mode, digits.len()) {
            (ColorMode::Rgb, 3) => {
                let mut expanded = String::with_capacity(7);
                expanded.push('#');
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Some(expanded)
            }
            (mode, len) if len == mode.digits() => Some(format!("#{digits}")),
            _ => None,
        }
    }

    /// Whether `value` is already in canonical form for this mode.
    pub fn is_canonical(&self, value: &str) -> bool {
        value
            .strip_prefix('#')
            .map(|digits| {
                digits.len() == self.mode.digits()
                    && digits.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
            })
            .unwrap_or(false)
    }
}

/// A bone storing one color in canonical hex form.
#[derive(Debug, Clone, Default)]
pub struct ColorBone {
    pub options: BoneOptions,
    normalizer: ColorValueNormalizer,
}

impl ColorBone {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            options: BoneOptions::default(),
            normalizer: ColorValueNormalizer::new(mode),
        }
    }

    pub fn with_options(mut self, options: BoneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn mode(&self) -> ColorMode {
        self.normalizer.mode()
    }

    pub fn from_client(&self, raw: Option<&str>) -> ReadOutcome<Value> {
        self.normalizer
            .validate_and_normalize_with(raw, |candidate| {
                self.options.is_invalid(&Value::String(candidate.to_string()))
            })
            .map(Value::String)
    }

    /// Stored values that are not canonical colors load as no value.
    pub fn unserialize(&self, stored: &Value) -> Value {
        match stored {
            Value::String(s) if self.normalizer.is_canonical(s) => stored.clone(),
            _ => Value::Null,
        }
    }
}
