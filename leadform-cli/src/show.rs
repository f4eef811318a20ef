//! `leadform show` - render a record the way a read-only view displays it.

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use leadform_fields::{display_rows, DisplayRow};

use crate::record::{load_schema, read_record};
use crate::table::new_table;

/// Shown in place of a value the record leaves empty.
pub const NOT_PROVIDED: &str = "Not provided";

/// Run the show command.
pub async fn run_show(schema: &Path, record_path: &Path, json: bool) -> Result<()> {
    let ctx = load_schema(schema).await?;
    let record = read_record(record_path).await?;
    let rows = display_rows(ctx.all_fields(), &record, ctx.registry());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = new_table(&["Field", "Value"]);
    for row in &rows {
        table.add_row(vec![Cell::new(&row.label), Cell::new(row_value(row))]);
    }
    println!("{table}");
    Ok(())
}

fn row_value(row: &DisplayRow) -> &str {
    row.value.as_deref().unwrap_or(NOT_PROVIDED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: Option<&str>) -> DisplayRow {
        DisplayRow {
            key: "city".into(),
            label: "City".into(),
            value: value.map(String::from),
            help_text: None,
        }
    }

    #[test]
    fn empty_rows_say_not_provided() {
        assert_eq!(row_value(&row(None)), NOT_PROVIDED);
        assert_eq!(row_value(&row(Some("Singapore"))), "Singapore");
    }
}
