//! `leadform validate` - check a record file against a schema.

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use leadform_fields::{validate_record, ValidationFailure};
use tracing::warn;

use crate::record::{load_schema, read_record, unknown_keys};
use crate::table::new_table;

/// Run the validate command. Returns the number of failures found.
pub async fn run_validate(schema: &Path, record_path: &Path, json: bool) -> Result<usize> {
    let ctx = load_schema(schema).await?;
    let record = read_record(record_path).await?;

    for key in unknown_keys(&ctx, &record) {
        warn!(%key, "record has a key the schema does not define");
    }

    let failures = validate_record(ctx.all_fields(), &record);

    if json {
        println!("{}", render_json(&failures)?);
    } else if failures.is_empty() {
        println!("{} is valid", record_path.display());
    } else {
        let mut table = new_table(&["Field", "Problem", "Message"]);
        for failure in &failures {
            let label = ctx
                .get_field(&failure.field)
                .map(|f| f.label.as_str())
                .unwrap_or(&failure.field);
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format!("{:?}", failure.kind)),
                Cell::new(&failure.message),
            ]);
        }
        println!("{table}");
        println!(
            "\n{} problem{} found",
            failures.len(),
            if failures.len() == 1 { "" } else { "s" }
        );
    }

    Ok(failures.len())
}

fn render_json(failures: &[ValidationFailure]) -> Result<String> {
    let output = serde_json::json!({
        "valid": failures.is_empty(),
        "failures": failures,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
