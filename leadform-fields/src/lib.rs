//! Metadata-driven record validation and formatting
//!
//! `leadform-fields` validates and renders records whose shape comes from a
//! runtime field schema rather than from code. A lead record in a sales CRM
//! is the motivating case, but nothing here is lead-specific apart from the
//! optional built-in defaults.
//!
//! # Architecture
//!
//! - **Schema**: `FieldDef` describes one field's type, constraints and hints
//! - **Lists of values**: `LovRegistry` maps codes to ordered value/label pairs
//! - **Validation**: `validate()` is a pure check of one value against one field
//! - **Formatting**: `format_value()` renders a raw value for display, never fails
//! - **Form state**: `FormState` drives change/blur/submit for one editing session
//! - **Schema on disk**: `SchemaContext` loads YAML definitions and seeds defaults

pub mod context;
pub mod date;
pub mod defaults;
pub mod error;
pub mod form;
pub mod format;
pub mod lov;
pub mod submit;
pub mod types;
pub mod validation;
pub mod value;

pub use context::{SchemaContext, SchemaContextBuilder, SchemaDefaults};
pub use defaults::lead_defaults;
pub use error::{FieldsError, Result};
pub use form::{FormState, SubmitOutcome};
pub use format::{display_rows, format_value, label_for, DisplayRow, EMPTY_PLACEHOLDER};
pub use lov::{LovOption, LovRegistry};
pub use submit::{RecordSubmitter, YamlFileSubmitter};
pub use types::{DataType, FieldDef};
pub use validation::{validate, validate_record, FailureKind, ValidationFailure};
pub use value::{RawValue, Record};
