//! Validation engine: decides whether a raw value is acceptable for a field.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. required: null, `""` and `[]` fail a required field
//! 2. absence: an empty optional value is always valid
//! 3. type-specific checks for EMAIL, PHONE, NUMBER and DATE
//! 4. configured `max_length` and `regex_pattern` constraints
//!
//! Nothing here returns an error for a malformed schema. Cases the engine
//! cannot judge (unknown bounds, bad patterns, list-of-values membership)
//! are treated as valid.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date::parse_date;
use crate::types::{DataType, FieldDef};
use crate::value::{number_to_string, RawValue, Record};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]{7,}$").expect("valid phone regex"));

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    RequiredFieldMissing,
    /// Email, phone or date value that does not parse.
    InvalidFormat,
    NumberOutOfRange,
    NotANumber,
    TooLong,
    PatternMismatch,
}

/// A field-scoped, user-correctable rejection of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub field: String,
    pub kind: FailureKind,
    pub message: String,
}

impl ValidationFailure {
    fn new(field: &FieldDef, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            field: field.key.clone(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check one value against its field definition.
pub fn validate(field: &FieldDef, value: &RawValue) -> Option<ValidationFailure> {
    if value.is_empty() {
        if field.required {
            return Some(ValidationFailure::new(
                field,
                FailureKind::RequiredFieldMissing,
                format!("{} is required", field.label),
            ));
        }
        return None;
    }

    check_type(field, value).or_else(|| check_constraints(field, value))
}

/// Validate every visible field of `fields` against `record`, in schema order.
pub fn validate_record(fields: &[FieldDef], record: &Record) -> Vec<ValidationFailure> {
    fields
        .iter()
        .filter(|f| f.visible)
        .filter_map(|f| validate(f, record.value(&f.key)))
        .collect()
}

fn check_type(field: &FieldDef, value: &RawValue) -> Option<ValidationFailure> {
    match field.data_type {
        DataType::Email => match value.as_text() {
            Some(s) if !EMAIL_REGEX.is_match(s) => Some(ValidationFailure::new(
                field,
                FailureKind::InvalidFormat,
                "Invalid email format",
            )),
            _ => None,
        },
        DataType::Phone => match value.as_text() {
            Some(s) if !PHONE_REGEX.is_match(s) => Some(ValidationFailure::new(
                field,
                FailureKind::InvalidFormat,
                "Invalid phone format",
            )),
            _ => None,
        },
        DataType::Number => check_number(field, value),
        DataType::Date => match value.as_text() {
            Some(s) if parse_date(s).is_none() => Some(ValidationFailure::new(
                field,
                FailureKind::InvalidFormat,
                "Invalid date format",
            )),
            _ => None,
        },
        DataType::Text
        | DataType::TextArea
        | DataType::Dropdown
        | DataType::MultiSelect
        | DataType::User => None,
    }
}

fn check_number(field: &FieldDef, value: &RawValue) -> Option<ValidationFailure> {
    let Some(num) = parse_number(value) else {
        return Some(ValidationFailure::new(
            field,
            FailureKind::NotANumber,
            format!("{} must be a valid number", field.label),
        ));
    };

    if let Some(min) = field.min_value.as_deref() {
        if let Some(bound) = parse_bound(field, min) {
            if num < bound {
                return Some(ValidationFailure::new(
                    field,
                    FailureKind::NumberOutOfRange,
                    format!("{} must be at least {}", field.label, min),
                ));
            }
        }
    }

    if let Some(max) = field.max_value.as_deref() {
        if let Some(bound) = parse_bound(field, max) {
            if num > bound {
                return Some(ValidationFailure::new(
                    field,
                    FailureKind::NumberOutOfRange,
                    format!("{} must not exceed {}", field.label, max),
                ));
            }
        }
    }

    None
}

fn check_constraints(field: &FieldDef, value: &RawValue) -> Option<ValidationFailure> {
    let text: Cow<'_, str> = match value {
        RawValue::Text(s) => Cow::Borrowed(s),
        RawValue::Number(n) => Cow::Owned(number_to_string(*n)),
        RawValue::Null | RawValue::List(_) => return None,
    };

    if let Some(max_len) = field.max_length {
        if text.chars().count() > max_len {
            return Some(ValidationFailure::new(
                field,
                FailureKind::TooLong,
                format!("{} must be at most {} characters", field.label, max_len),
            ));
        }
    }

    if let Some(pattern) = field.regex_pattern.as_deref() {
        if let Some(re) = compiled_pattern(field, pattern) {
            if !re.is_match(&text) {
                let message = field
                    .regex_message
                    .clone()
                    .unwrap_or_else(|| format!("{} has an invalid format", field.label));
                return Some(ValidationFailure::new(
                    field,
                    FailureKind::PatternMismatch,
                    message,
                ));
            }
        }
    }

    None
}

/// Compiled form of a configured pattern, cached by pattern text.
///
/// A pattern that fails to compile is cached as `None` and warned about once.
fn compiled_pattern(field: &FieldDef, pattern: &str) -> Option<Regex> {
    static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Option<Regex>>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cached) = cache.get(pattern) {
        return cached.clone();
    }

    let compiled = match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(field = %field.key, %pattern, %e, "skipping invalid regex pattern");
            None
        }
    };
    cache.insert(pattern.to_string(), compiled.clone());
    compiled
}

/// Parse a raw value as a finite float. Lists never parse.
pub fn parse_number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Text(s) => parse_number_str(s),
        _ => None,
    }
}

pub(crate) fn parse_number_str(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bound(field: &FieldDef, raw: &str) -> Option<f64> {
    let bound = parse_number_str(raw);
    if bound.is_none() && !raw.trim().is_empty() {
        debug!(field = %field.key, bound = %raw, "ignoring unparseable numeric bound");
    }
    bound
}
