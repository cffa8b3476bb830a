//! Single-line string bone.

use serde_json::Value;

use super::BoneOptions;
use crate::read::{present, ReadOutcome};

/// Default upper bound on the number of characters.
pub const DEFAULT_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone)]
pub struct StringBone {
    pub options: BoneOptions,
    pub max_length: usize,
}

impl Default for StringBone {
    fn default() -> Self {
        Self {
            options: BoneOptions::default(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl StringBone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BoneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn from_client(&self, raw: Option<&str>) -> ReadOutcome<Value> {
        let raw = match present(raw) {
            Ok(raw) => raw,
            Err(outcome) => return outcome,
        };

        if raw.contains(|c: char| c == '\n' || c == '\r') {
            return ReadOutcome::Invalid("Value must be a single line".to_string());
        }
        if raw.chars().count() > self.max_length {
            return ReadOutcome::Invalid("Maximum length exceeded".to_string());
        }

        let value = Value::String(raw.to_string());
        match self.options.is_invalid(&value) {
            Some(reason) => ReadOutcome::Invalid(reason),
            None => ReadOutcome::Valid(value),
        }
    }

    pub fn unserialize(&self, stored: &Value) -> Value {
        match stored {
            Value::String(_) => stored.clone(),
            Value::Number(n) => Value::String(n.to_string()),
            _ => Value::Null,
        }
    }
}
