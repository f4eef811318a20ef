//! Core field schema types.
//!
//! All types serialize to/from YAML via serde. A field definition describes
//! one named, typed attribute of a record together with its constraints and
//! presentation hints. Definitions are pure data; the validation and
//! formatting engines interpret them.

use serde::{Deserialize, Serialize};

use crate::value::RawValue;

/// The type of a field. Determines how its raw value is checked and shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Text,
    Email,
    Phone,
    Number,
    Date,
    Dropdown,
    #[serde(rename = "MULTISELECT")]
    MultiSelect,
    User,
    #[serde(rename = "TEXTAREA")]
    TextArea,
}

impl DataType {
    /// Types whose values resolve through a list of values.
    pub fn is_enumerable(self) -> bool {
        matches!(
            self,
            DataType::Dropdown | DataType::MultiSelect | DataType::User
        )
    }

    /// Types whose raw value is a list rather than a scalar.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, DataType::MultiSelect)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::Text => "TEXT",
            DataType::Email => "EMAIL",
            DataType::Phone => "PHONE",
            DataType::Number => "NUMBER",
            DataType::Date => "DATE",
            DataType::Dropdown => "DROPDOWN",
            DataType::MultiSelect => "MULTISELECT",
            DataType::User => "USER",
            DataType::TextArea => "TEXTAREA",
        };
        f.write_str(s)
    }
}

fn default_true() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A field definition: the complete schema for a single record attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Stable key, unique within a schema. Records are keyed by it.
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default)]
    pub display_order: i32,

    // --- Constraints ---
    /// Lower bound for NUMBER fields, kept as the configured literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<String>,
    /// Upper bound for NUMBER fields, kept as the configured literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Decimal places used when rendering NUMBER values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_scale: Option<u32>,
    /// List of values code for DROPDOWN, MULTISELECT and USER fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lov_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<RawValue>,

    // --- Presentation hints ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub editable: bool,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub visible: bool,
}

impl FieldDef {
    /// Create an optional, visible, editable field with no constraints.
    pub fn new(key: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
            data_type,
            required: false,
            display_order: 0,
            min_value: None,
            max_value: None,
            regex_pattern: None,
            regex_message: None,
            max_length: None,
            db_scale: None,
            lov_code: None,
            default_value: None,
            placeholder: None,
            help_text: None,
            editable: true,
            visible: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }

    pub fn lov(mut self, code: impl Into<String>) -> Self {
        self.lov_code = Some(code.into());
        self
    }

    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.db_scale = Some(scale);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>, message: Option<&str>) -> Self {
        self.regex_pattern = Some(pattern.into());
        self.regex_message = message.map(str::to_string);
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Placeholder text, falling back to a per-type hint if none is configured.
    pub fn effective_placeholder(&self) -> Option<String> {
        if let Some(ref p) = self.placeholder {
            if !p.is_empty() {
                return Some(p.clone());
            }
        }
        let label = self.label.to_lowercase();
        match self.data_type {
            DataType::Text | DataType::TextArea => Some(format!("Enter {label}")),
            DataType::Email => Some("email@example.com".into()),
            DataType::Phone => Some("+1 (555) 000-0000".into()),
            DataType::Number => Some("0".into()),
            DataType::Dropdown | DataType::User => Some(format!("Select {label}")),
            DataType::Date | DataType::MultiSelect => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_yaml_tags() {
        let yaml = serde_yaml_ng::to_string(&DataType::MultiSelect).unwrap();
        assert_eq!(yaml.trim(), "MULTISELECT");
        let yaml = serde_yaml_ng::to_string(&DataType::TextArea).unwrap();
        assert_eq!(yaml.trim(), "TEXTAREA");
        let parsed: DataType = serde_yaml_ng::from_str("DROPDOWN").unwrap();
        assert_eq!(parsed, DataType::Dropdown);
    }

    #[test]
    fn data_type_display_matches_serde() {
        for dt in [
            DataType::Text,
            DataType::Email,
            DataType::Phone,
            DataType::Number,
            DataType::Date,
            DataType::Dropdown,
            DataType::MultiSelect,
            DataType::User,
            DataType::TextArea,
        ] {
            let yaml = serde_yaml_ng::to_string(&dt).unwrap();
            assert_eq!(yaml.trim(), dt.to_string());
        }
    }

    #[test]
    fn enumerable_types() {
        assert!(DataType::Dropdown.is_enumerable());
        assert!(DataType::User.is_enumerable());
        assert!(DataType::MultiSelect.is_enumerable());
        assert!(!DataType::Text.is_enumerable());
        assert!(DataType::MultiSelect.is_multi_valued());
        assert!(!DataType::Dropdown.is_multi_valued());
    }

    #[test]
    fn minimal_field_from_yaml() {
        let yaml_input = r#"
key: company_name
label: Company Name
type: TEXT
"#;
        let field: FieldDef = serde_yaml_ng::from_str(yaml_input).unwrap();
        assert_eq!(field.key, "company_name");
        assert_eq!(field.data_type, DataType::Text);
        assert!(!field.required);
        assert!(field.editable);
        assert!(field.visible);
        assert_eq!(field.lov_code, None);
    }

    #[test]
    fn number_field_from_yaml() {
        let yaml_input = r#"
key: estimated_monthly_volume
label: Estimated Monthly Volume
type: NUMBER
required: true
display_order: 12
min_value: "0"
max_value: "1000000"
db_scale: 2
help_text: Shipments per month
"#;
        let field: FieldDef = serde_yaml_ng::from_str(yaml_input).unwrap();
        assert_eq!(field.data_type, DataType::Number);
        assert!(field.required);
        assert_eq!(field.display_order, 12);
        assert_eq!(field.min_value.as_deref(), Some("0"));
        assert_eq!(field.max_value.as_deref(), Some("1000000"));
        assert_eq!(field.db_scale, Some(2));
    }

    #[test]
    fn multiselect_default_value_list() {
        let yaml_input = r#"
key: service_line_interested
label: Service Lines
type: MULTISELECT
lov_code: SERVICE_LINE_INTERESTED_LOV
default_value: [TRANSPORTATION]
"#;
        let field: FieldDef = serde_yaml_ng::from_str(yaml_input).unwrap();
        assert_eq!(
            field.default_value,
            Some(RawValue::List(vec!["TRANSPORTATION".into()]))
        );
    }

    #[test]
    fn field_def_yaml_round_trip() {
        let field = FieldDef::new("lead_status", "Lead Status", DataType::Dropdown)
            .required()
            .order(7)
            .lov("LEAD_STATUS_LOV")
            .default_value("NEW")
            .help("Where the lead is in the funnel");
        let yaml = serde_yaml_ng::to_string(&field).unwrap();
        assert!(yaml.contains("type: DROPDOWN"));
        assert!(!yaml.contains("visible"));
        let parsed: FieldDef = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn hidden_flags_serialize() {
        let field = FieldDef::new("lead_id", "Lead ID", DataType::Text)
            .hidden()
            .read_only();
        let yaml = serde_yaml_ng::to_string(&field).unwrap();
        assert!(yaml.contains("visible: false"));
        assert!(yaml.contains("editable: false"));
    }

    #[test]
    fn effective_placeholder_fallbacks() {
        let text = FieldDef::new("city", "City", DataType::Text);
        assert_eq!(text.effective_placeholder().as_deref(), Some("Enter city"));

        let email = FieldDef::new("email", "Email", DataType::Email);
        assert_eq!(
            email.effective_placeholder().as_deref(),
            Some("email@example.com")
        );

        let status = FieldDef::new("lead_status", "Lead Status", DataType::Dropdown);
        assert_eq!(
            status.effective_placeholder().as_deref(),
            Some("Select lead status")
        );

        let date = FieldDef::new("expected_start_date", "Start", DataType::Date);
        assert_eq!(date.effective_placeholder(), None);
    }

    #[test]
    fn effective_placeholder_explicit_overrides() {
        let mut phone = FieldDef::new("phone", "Phone", DataType::Phone);
        phone.placeholder = Some("+65 0000 0000".into());
        assert_eq!(
            phone.effective_placeholder().as_deref(),
            Some("+65 0000 0000")
        );

        phone.placeholder = Some(String::new());
        assert_eq!(
            phone.effective_placeholder().as_deref(),
            Some("+1 (555) 000-0000")
        );
    }
}
