//! List-of-values registry.
//!
//! Maps a code (e.g. `LEAD_STATUS_LOV`) to an ordered list of value/label
//! pairs. Built once from the schema source, then shared by reference with
//! the validation and formatting engines.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// A single option in a list of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LovOption {
    pub value: String,
    pub label: String,
}

impl LovOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Read-only lookup tables for enumerable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LovRegistry {
    tables: HashMap<String, Vec<LovOption>>,
}

impl LovRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_list(mut self, code: impl Into<String>, options: Vec<LovOption>) -> Result<Self> {
        self.insert(code, options)?;
        Ok(self)
    }

    /// Register (or replace) the options for `code`.
    ///
    /// Fails if two options share a value.
    pub fn insert(&mut self, code: impl Into<String>, options: Vec<LovOption>) -> Result<()> {
        let code = code.into();
        let mut seen = HashSet::new();
        for opt in &options {
            if !seen.insert(opt.value.as_str()) {
                return Err(FieldsError::DuplicateLovValue {
                    code,
                    value: opt.value.clone(),
                });
            }
        }
        self.tables.insert(code, options);
        Ok(())
    }

    /// The ordered options for `code`.
    pub fn options(&self, code: &str) -> Option<&[LovOption]> {
        self.tables.get(code).map(Vec::as_slice)
    }

    /// The ordered options for `code`, or an error naming the missing code.
    pub fn require(&self, code: &str) -> Result<&[LovOption]> {
        self.options(code).ok_or_else(|| FieldsError::LovNotFound {
            code: code.to_string(),
        })
    }

    /// Resolve a stored value to its label.
    pub fn label_for(&self, code: &str, value: &str) -> Option<&str> {
        self.options(code)?
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.tables.contains_key(code)
    }

    /// All registered codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_options() -> Vec<LovOption> {
        vec![
            LovOption::new("NEW", "New"),
            LovOption::new("CONTACTED", "Contacted"),
            LovOption::new("QUALIFIED", "Qualified"),
        ]
    }

    #[test]
    fn resolves_labels() {
        let reg = LovRegistry::new()
            .with_list("LEAD_STATUS_LOV", status_options())
            .unwrap();
        assert_eq!(reg.label_for("LEAD_STATUS_LOV", "NEW"), Some("New"));
        assert_eq!(reg.label_for("LEAD_STATUS_LOV", "LOST"), None);
        assert_eq!(reg.label_for("NO_SUCH_LOV", "NEW"), None);
    }

    #[test]
    fn preserves_option_order() {
        let reg = LovRegistry::new()
            .with_list("LEAD_STATUS_LOV", status_options())
            .unwrap();
        let values: Vec<_> = reg
            .options("LEAD_STATUS_LOV")
            .unwrap()
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["NEW", "CONTACTED", "QUALIFIED"]);
    }

    #[test]
    fn duplicate_value_rejected() {
        let result = LovRegistry::new().with_list(
            "COUNTRY_LOV",
            vec![
                LovOption::new("US", "United States"),
                LovOption::new("US", "USA"),
            ],
        );
        match result {
            Err(FieldsError::DuplicateLovValue { code, value }) => {
                assert_eq!(code, "COUNTRY_LOV");
                assert_eq!(value, "US");
            }
            other => panic!("expected DuplicateLovValue, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_label_allowed() {
        let reg = LovRegistry::new()
            .with_list(
                "SALES_REP_LOV",
                vec![
                    LovOption::new("u1", "Alex"),
                    LovOption::new("u2", "Alex"),
                ],
            )
            .unwrap();
        assert_eq!(reg.options("SALES_REP_LOV").unwrap().len(), 2);
    }

    #[test]
    fn require_missing_code() {
        let reg = LovRegistry::new();
        assert!(matches!(
            reg.require("COUNTRY_LOV"),
            Err(FieldsError::LovNotFound { .. })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn codes_sorted() {
        let reg = LovRegistry::new()
            .with_list("Z_LOV", vec![])
            .unwrap()
            .with_list("A_LOV", vec![])
            .unwrap();
        assert_eq!(reg.codes(), vec!["A_LOV", "Z_LOV"]);
        assert!(reg.contains("Z_LOV"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn options_from_yaml() {
        let yaml = r#"
- value: WEBSITE
  label: Website
- value: COLD_CALL
  label: Cold Call
"#;
        let options: Vec<LovOption> = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(options[1], LovOption::new("COLD_CALL", "Cold Call"));
    }
}
