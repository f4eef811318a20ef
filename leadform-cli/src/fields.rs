//! `leadform fields` - list the fields a schema defines.

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use leadform_fields::FieldDef;

use crate::record::load_schema;
use crate::table::{new_table, truncate_str};

/// Run the fields command.
pub async fn run_fields(schema: &Path, json: bool) -> Result<()> {
    let ctx = load_schema(schema).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.all_fields())?);
        return Ok(());
    }

    if ctx.all_fields().is_empty() {
        println!("No fields defined in {}", schema.display());
        return Ok(());
    }

    let mut table = new_table(&["Key", "Label", "Type", "Required", "LOV", "Constraints"]);
    for field in ctx.all_fields() {
        let label = if field.visible {
            field.label.clone()
        } else {
            format!("{} (hidden)", field.label)
        };
        table.add_row(vec![
            Cell::new(&field.key),
            Cell::new(truncate_str(&label, 40)),
            Cell::new(field.data_type),
            Cell::new(if field.required { "yes" } else { "" }),
            Cell::new(field.lov_code.as_deref().unwrap_or("")),
            Cell::new(truncate_str(&describe_constraints(field), 50)),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Summarize the constraints that validation applies to a field.
pub fn describe_constraints(field: &FieldDef) -> String {
    let mut parts = Vec::new();
    match (&field.min_value, &field.max_value) {
        (Some(min), Some(max)) => parts.push(format!("{min}..{max}")),
        (Some(min), None) => parts.push(format!(">= {min}")),
        (None, Some(max)) => parts.push(format!("<= {max}")),
        (None, None) => {}
    }
    if let Some(scale) = field.db_scale {
        parts.push(format!("scale {scale}"));
    }
    if let Some(len) = field.max_length {
        parts.push(format!("max {len} chars"));
    }
    if let Some(pattern) = &field.regex_pattern {
        parts.push(format!("/{pattern}/"));
    }
    if !field.editable {
        parts.push("read-only".to_string());
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_fields::DataType;

    #[test]
    fn constraints_for_bounded_number() {
        let field = FieldDef::new("vol", "Volume", DataType::Number)
            .min("0")
            .max("1000000")
            .scale(2);
        assert_eq!(describe_constraints(&field), "0..1000000, scale 2");
    }

    #[test]
    fn constraints_for_plain_text_are_empty() {
        let field = FieldDef::new("city", "City", DataType::Text);
        assert_eq!(describe_constraints(&field), "");
    }

    #[test]
    fn constraints_for_read_only_pattern() {
        let field = FieldDef::new("id", "ID", DataType::Text)
            .pattern(r"^LD-\d+$", None)
            .read_only();
        assert_eq!(describe_constraints(&field), r"/^LD-\d+$/, read-only");
    }
}
