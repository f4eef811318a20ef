//! Formatting engine: turns raw values into human-readable strings.
//!
//! Every branch has a fallback, so formatting never fails: unresolvable
//! list-of-values lookups and unparseable numbers or dates render as the
//! raw value.

use serde::Serialize;

use crate::date::{display_date, parse_date};
use crate::lov::LovRegistry;
use crate::types::{DataType, FieldDef};
use crate::validation::parse_number;
use crate::value::{number_to_string, RawValue, Record};

/// Rendered in place of a null value.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Render one value for display.
pub fn format_value(field: &FieldDef, value: &RawValue, registry: &LovRegistry) -> String {
    if value.is_null() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    match field.data_type {
        DataType::Date => format_date(value),
        DataType::Number => format_number(value, field.db_scale),
        DataType::Dropdown | DataType::User => match value {
            RawValue::Text(s) => label_for(field, registry, s),
            RawValue::Number(n) => label_for(field, registry, &number_to_string(*n)),
            other => other.to_plain_string(),
        },
        DataType::MultiSelect => match value {
            RawValue::List(items) => items
                .iter()
                .map(|v| label_for(field, registry, v))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_plain_string(),
        },
        DataType::Text | DataType::TextArea | DataType::Email | DataType::Phone => {
            value.to_plain_string()
        }
    }
}

/// Resolve a single stored value through the field's list of values.
///
/// Falls back to the value itself when the field has no `lov_code`, the code
/// is not registered, or the value is not one of its options.
pub fn label_for(field: &FieldDef, registry: &LovRegistry, value: &str) -> String {
    field
        .lov_code
        .as_deref()
        .and_then(|code| registry.label_for(code, value))
        .unwrap_or(value)
        .to_string()
}

fn format_date(value: &RawValue) -> String {
    match value {
        RawValue::Text(s) if s.is_empty() => EMPTY_PLACEHOLDER.to_string(),
        RawValue::Text(s) => parse_date(s)
            .map(display_date)
            .unwrap_or_else(|| s.clone()),
        other => other.to_plain_string(),
    }
}

fn format_number(value: &RawValue, scale: Option<u32>) -> String {
    match parse_number(value) {
        Some(n) => match scale {
            Some(places) if places > 0 => format!("{:.*}", places as usize, n),
            _ => number_to_string(n),
        },
        None => value.to_plain_string(),
    }
}

/// One row of a read-only record view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub key: String,
    pub label: String,
    /// Formatted value, or `None` when the record has nothing for this field.
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Build the display view of `record`: one row per visible field, in schema order.
pub fn display_rows(fields: &[FieldDef], record: &Record, registry: &LovRegistry) -> Vec<DisplayRow> {
    fields
        .iter()
        .filter(|f| f.visible)
        .map(|f| {
            let raw = record.value(&f.key);
            DisplayRow {
                key: f.key.clone(),
                label: f.label.clone(),
                value: (!raw.is_empty()).then(|| format_value(f, raw, registry)),
                help_text: f.help_text.clone(),
            }
        })
        .collect()
}
