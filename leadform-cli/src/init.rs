//! `leadform init` - seed a schema directory with the built-in lead schema.

use std::path::Path;

use anyhow::{Context, Result};
use leadform_fields::{lead_defaults, SchemaContext};

/// Run the init command.
///
/// Existing field and list-of-values files are left alone, so running init
/// twice is harmless.
pub async fn run_init(dir: &Path) -> Result<()> {
    let ctx = SchemaContext::open(dir)
        .with_defaults(lead_defaults())
        .build()
        .await
        .with_context(|| format!("failed to initialize schema in {}", dir.display()))?;

    println!(
        "Schema ready at {} ({} fields, {} lists of values)",
        ctx.root().display(),
        ctx.all_fields().len(),
        ctx.registry().len()
    );
    Ok(())
}
