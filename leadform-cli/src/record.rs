//! Loading schemas and record files from disk.

use std::path::Path;

use anyhow::{Context, Result};
use leadform_fields::{Record, SchemaContext};

/// Load the schema rooted at `dir`.
pub async fn load_schema(dir: &Path) -> Result<SchemaContext> {
    SchemaContext::load(dir)
        .await
        .with_context(|| format!("failed to load schema from {}", dir.display()))
}

/// Read a record file. YAML is a superset of JSON, so both formats parse.
pub async fn read_record(path: &Path) -> Result<Record> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_record(&text).with_context(|| format!("{} is not a valid record", path.display()))
}

/// Parse record text. An empty document is an empty record.
pub fn parse_record(text: &str) -> Result<Record> {
    if text.trim().is_empty() {
        return Ok(Record::new());
    }
    Ok(serde_yaml_ng::from_str(text)?)
}

/// Record keys that the schema does not define.
pub fn unknown_keys<'a>(ctx: &SchemaContext, record: &'a Record) -> Vec<&'a str> {
    record
        .iter()
        .map(|(k, _)| k.as_str())
        .filter(|k| ctx.get_field(k).is_none())
        .collect()
}
