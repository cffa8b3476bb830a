//! Currency bone backed by an explicit formatting table.
//!
//! Amounts are stored as numbers rounded to two decimals. Parsing and display
//! follow the [`CurrencyFormat`] for the bone's symbol, independent of the
//! host's locale settings.

use bonekit_config::CurrencyConfig;
use serde_json::Value;
use tracing::trace;

use super::BoneOptions;
use crate::read::{present, ReadOutcome};

/// Digits after the decimal separator.
pub const PRECISION: i32 = 2;

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// How amounts in one currency are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub code: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub position: SymbolPosition,
    /// Whether a space separates symbol and amount.
    pub spaced: bool,
}

/// Known currencies. The first entry is the fallback for unknown symbols.
pub const CURRENCY_FORMATS: &[CurrencyFormat] = &[
    CurrencyFormat {
        symbol: "€",
        code: "EUR",
        decimal_separator: ',',
        grouping_separator: '.',
        position: SymbolPosition::Suffix,
        spaced: true,
    },
    CurrencyFormat {
        symbol: "$",
        code: "USD",
        decimal_separator: '.',
        grouping_separator: ',',
        position: SymbolPosition::Prefix,
        spaced: false,
    },
    CurrencyFormat {
        symbol: "£",
        code: "GBP",
        decimal_separator: '.',
        grouping_separator: ',',
        position: SymbolPosition::Prefix,
        spaced: false,
    },
    CurrencyFormat {
        symbol: "CHF",
        code: "CHF",
        decimal_separator: '.',
        grouping_separator: '\'',
        position: SymbolPosition::Prefix,
        spaced: true,
    },
];

impl CurrencyFormat {
    /// Find the format for a symbol or ISO code, falling back to euro.
    pub fn lookup(symbol: &str) -> &'static CurrencyFormat {
        let symbol = symbol.trim();
        CURRENCY_FORMATS
            .iter()
            .find(|f| f.symbol == symbol || f.code.eq_ignore_ascii_case(symbol))
            .unwrap_or(&CURRENCY_FORMATS[0])
    }

    /// Render an amount with grouping, two decimals and the symbol.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u64;
        let units = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(digit);
        }

        let number = format!("{grouped}{}{fraction:02}", self.decimal_separator);
        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        let space = if self.spaced { " " } else { "" };
        match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{space}{number}", self.symbol),
            SymbolPosition::Suffix => format!("{sign}{number}{space}{}", self.symbol),
        }
    }

    /// Parse user input written in this format. Grouping separators are
    /// dropped wherever they appear before the decimal separator.
    pub fn parse(&self, input: &str) -> Option<f64> {
        let mut rest = input.trim();
        for marker in [self.symbol, self.code] {
            if let Some(stripped) = rest.strip_prefix(marker) {
                rest = stripped.trim_start();
            } else if let Some(stripped) = rest.strip_suffix(marker) {
                rest = stripped.trim_end();
            }
        }

        let (negative, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };

        let mut normalized = String::with_capacity(rest.len() + 1);
        let mut seen_decimal = false;
        let mut digits = 0usize;
        for c in rest.chars() {
            if c.is_ascii_digit() {
                normalized.push(c);
                digits += 1;
            } else if c == self.decimal_separator && !seen_decimal {
                normalized.push('.');
                seen_decimal = true;
            } else if c == self.grouping_separator && !seen_decimal && digits > 0 {
                continue;
            } else {
                return None;
            }
        }
        if digits == 0 {
            return None;
        }

        let value: f64 = normalized.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if negative { -value } else { value })
    }
}

fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    (value * factor).round() / factor
}

#[derive(Debug, Clone)]
pub struct CurrencyBone {
    pub options: BoneOptions,
    pub format: &'static CurrencyFormat,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl CurrencyBone {
    /// Create a bone for the given symbol or ISO code.
    pub fn new(currency: &str) -> Self {
        Self {
            options: BoneOptions::default(),
            format: CurrencyFormat::lookup(currency),
            min: None,
            max: None,
        }
    }

    /// Create a bone for the configured default currency.
    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self::new(&config.default_symbol)
    }

    pub fn with_options(mut self, options: BoneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn from_client(&self, raw: Option<&str>) -> ReadOutcome<Value> {
        let raw = match present(raw) {
            Ok(raw) => raw,
            Err(outcome) => return outcome,
        };

        let Some(amount) = self.format.parse(raw) else {
            return ReadOutcome::invalid();
        };
        let amount = round_to_precision(amount);
        trace!(raw, amount, currency = self.format.code, "parsed currency amount");

        if let Some(min) = self.min {
            if amount < min {
                return ReadOutcome::Invalid(format!("Value must be at least {}", self.format.format(min)));
            }
        }
        if let Some(max) = self.max {
            if amount > max {
                return ReadOutcome::Invalid(format!("Value must be at most {}", self.format.format(max)));
            }
        }

        let value = Value::from(amount);
        match self.options.is_invalid(&value) {
            Some(reason) => ReadOutcome::Invalid(reason),
            None => ReadOutcome::Valid(value),
        }
    }

    pub fn serialize(&self, value: &Value) -> Value {
        match value.as_f64() {
            Some(amount) => Value::from(round_to_precision(amount)),
            None => Value::Null,
        }
    }

    /// Numbers load as-is; strings are parsed with this bone's format.
    pub fn unserialize(&self, stored: &Value) -> Value {
        match stored {
            Value::Number(_) => self.serialize(stored),
            Value::String(s) => self
                .format
                .parse(s)
                .map(|amount| Value::from(round_to_precision(amount)))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Formatted amount. No value renders as zero.
    pub fn display(&self, value: &Value) -> String {
        self.format.format(value.as_f64().unwrap_or(0.0))
    }
}
