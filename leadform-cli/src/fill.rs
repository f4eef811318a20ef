//! `leadform new` - fill in a record interactively.
//!
//! Each visible, editable field is prompted in schema order. A field is
//! re-prompted until it passes validation on blur, and the whole record is
//! validated again on submit before it is written out.

use std::path::Path;

use anyhow::{bail, Result};
use leadform_fields::{
    DataType, FieldDef, FormState, LovOption, LovRegistry, RawValue, SubmitOutcome,
    YamlFileSubmitter,
};
use tracing::debug;

use crate::record::{load_schema, read_record};

/// Label of the extra choice that leaves an optional dropdown empty.
const NO_SELECTION: &str = "(none)";

/// Run the interactive fill command.
pub async fn run_fill(schema: &Path, out: &Path, from: Option<&Path>) -> Result<()> {
    let ctx = load_schema(schema).await?;
    let initial = match from {
        Some(path) => Some(read_record(path).await?),
        None => None,
    };
    let mut form = ctx.new_form(initial);

    let keys: Vec<String> = form
        .visible_fields()
        .filter(|f| f.editable)
        .map(|f| f.key.clone())
        .collect();
    for key in &keys {
        edit_field(&mut form, key, ctx.registry())?;
    }

    let submitter = YamlFileSubmitter::new(out);
    loop {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Save record to {}?", out.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }

        match form.submit(&submitter).await? {
            SubmitOutcome::Submitted => {
                println!("Saved {}", out.display());
                return Ok(());
            }
            SubmitOutcome::Rejected(failures) => {
                println!("\nThe record has {} problem(s):", failures.len());
                for failure in &failures {
                    println!("  {failure}");
                }
                let editable: Vec<String> = failures
                    .iter()
                    .filter(|f| form.field(&f.field).is_some_and(|d| d.editable))
                    .map(|f| f.field.clone())
                    .collect();
                if editable.is_empty() {
                    bail!("record is invalid and the failing fields are read-only");
                }
                for key in &editable {
                    edit_field(&mut form, key, ctx.registry())?;
                }
            }
        }
    }
}

/// Prompt for one field until its value passes validation.
fn edit_field(form: &mut FormState, key: &str, registry: &LovRegistry) -> Result<()> {
    let Some(field) = form.field(key).cloned() else {
        return Ok(());
    };
    if let Some(help) = &field.help_text {
        println!("  {help}");
    }

    loop {
        let value = prompt_value(&field, form.value(key), registry)?;
        form.change_value(key, value);
        match form.blur(key) {
            Some(message) => eprintln!("  {message}"),
            None => return Ok(()),
        }
    }
}

fn prompt_value(field: &FieldDef, current: &RawValue, registry: &LovRegistry) -> Result<RawValue> {
    let prompt = prompt_label(field);
    let options = field
        .lov_code
        .as_deref()
        .and_then(|code| registry.options(code))
        .filter(|options| !options.is_empty());

    match (field.data_type, options) {
        (DataType::MultiSelect, Some(options)) => {
            let selected = current.as_list().unwrap_or_default();
            let checked: Vec<bool> = options
                .iter()
                .map(|o| selected.contains(&o.value))
                .collect();
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let picked = dialoguer::MultiSelect::new()
                .with_prompt(prompt)
                .items(&labels)
                .defaults(&checked)
                .interact()?;
            Ok(RawValue::List(
                picked.into_iter().map(|i| options[i].value.clone()).collect(),
            ))
        }
        (DataType::Dropdown | DataType::User, Some(options)) => {
            let choices = select_choices(options, field.required);
            let default = current
                .as_text()
                .and_then(|v| choices.iter().position(|(value, _)| value.as_deref() == Some(v)))
                .unwrap_or(0);
            let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
            let picked = dialoguer::Select::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(default)
                .interact()?;
            Ok(choices[picked]
                .0
                .clone()
                .map(RawValue::Text)
                .unwrap_or(RawValue::Null))
        }
        _ => {
            let text = dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .with_initial_text(current.to_plain_string())
                .allow_empty(true)
                .interact_text()?;
            debug!(key = %field.key, "read input");
            Ok(input_to_value(field, &text))
        }
    }
}

fn prompt_label(field: &FieldDef) -> String {
    let mut prompt = field.label.clone();
    if field.required {
        prompt.push_str(" *");
    }
    if let Some(hint) = field.effective_placeholder() {
        prompt.push_str(&format!(" ({hint})"));
    }
    prompt
}

/// Choices for a single-select prompt as `(stored value, label)` pairs.
/// Optional fields get a leading entry that clears the value.
fn select_choices(options: &[LovOption], required: bool) -> Vec<(Option<String>, String)> {
    let mut choices = Vec::with_capacity(options.len() + 1);
    if !required {
        choices.push((None, NO_SELECTION.to_string()));
    }
    choices.extend(
        options
            .iter()
            .map(|o| (Some(o.value.clone()), o.label.clone())),
    );
    choices
}

/// Turn typed text into the value stored on the record.
///
/// Blank input clears the field. Number fields store a number when the text
/// parses, otherwise the text itself so validation can report it. Multi-select
/// fields without options take a comma-separated list.
fn input_to_value(field: &FieldDef, text: &str) -> RawValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RawValue::Null;
    }
    match field.data_type {
        DataType::Number => match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(trimmed.to_string()),
        },
        DataType::MultiSelect => RawValue::List(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        DataType::TextArea => RawValue::Text(text.to_string()),
        _ => RawValue::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_clears_value() {
        let field = FieldDef::new("city", "City", DataType::Text);
        assert_eq!(input_to_value(&field, "   "), RawValue::Null);
    }

    #[test]
    fn number_input_is_stored_as_number() {
        let field = FieldDef::new("vol", "Volume", DataType::Number);
        assert_eq!(input_to_value(&field, " 1250.5 "), RawValue::Number(1250.5));
        assert_eq!(input_to_value(&field, "abc"), RawValue::from("abc"));
    }

    #[test]
    fn multiselect_input_splits_on_commas() {
        let field = FieldDef::new("tags", "Tags", DataType::MultiSelect);
        assert_eq!(
            input_to_value(&field, "a, b,,c"),
            RawValue::from(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn optional_select_offers_none() {
        let options = vec![LovOption::new("WEB", "Website")];
        let choices = select_choices(&options, false);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0], (None, NO_SELECTION.to_string()));
        assert_eq!(choices[1], (Some("WEB".into()), "Website".into()));
        assert_eq!(select_choices(&options, true).len(), 1);
    }

    #[test]
    fn prompt_marks_required_fields() {
        let field = FieldDef::new("email", "Email", DataType::Email).required();
        assert!(prompt_label(&field).starts_with("Email *"));
    }
}
