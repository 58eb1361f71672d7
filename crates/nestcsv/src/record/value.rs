//! Typed scalar values and string coercion.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Plain decimal notation with optional sign, fraction and exponent.
// Hex, `inf` and `nan` do not match.
static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap()
});

// Bounds of the f64 values that convert to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A scalar leaf value inferred from a raw field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl TypedValue {
    /// Lowercase name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Integer(_) => "integer",
            TypedValue::Float(_) => "float",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::String(_) => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypedValue::Integer(_) | TypedValue::Float(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as f64, for integers and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Integer(n) => Some(*n as f64),
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(n) => write!(f, "{}", n),
            TypedValue::Float(x) => write!(f, "{}", x),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Infer a typed value from a raw field.
///
/// Precedence: empty string, number, boolean literal, string. Numbers
/// without a fractional part that fit in an `i64` become integers, so
/// `"42.0"` and `"1e3"` are integers. Never fails.
pub fn coerce(raw: &str) -> TypedValue {
    if raw.is_empty() {
        return TypedValue::String(String::new());
    }

    if let Some(number) = parse_number(raw) {
        return number;
    }

    if raw.eq_ignore_ascii_case("true") {
        return TypedValue::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return TypedValue::Boolean(false);
    }

    TypedValue::String(raw.to_string())
}

fn parse_number(raw: &str) -> Option<TypedValue> {
    if !NUMERIC_PATTERN.is_match(raw) {
        return None;
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Some(TypedValue::Integer(n));
    }

    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    if value.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&value) {
        Some(TypedValue::Integer(value as i64))
    } else {
        Some(TypedValue::Float(value))
    }
}
