//! SchemaContext: loads field definitions and lists of values from disk.
//!
//! Manages a schema directory of YAML files and keeps an in-memory index by
//! field key. The loaded registry is handed out by reference to the
//! validation and formatting engines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::form::FormState;
use crate::lov::{LovOption, LovRegistry};
use crate::types::FieldDef;
use crate::value::Record;

/// A collection of default field definitions and lists of values.
///
/// Consumers build this to pass to `SchemaContextBuilder::with_defaults()`.
/// On open, defaults that don't already exist on disk are written.
pub struct SchemaDefaults {
    fields: Vec<FieldDef>,
    lovs: Vec<(String, Vec<LovOption>)>,
}

impl SchemaDefaults {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            lovs: Vec::new(),
        }
    }

    /// Add a default field definition.
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Add a default list of values.
    pub fn lov(mut self, code: impl Into<String>, options: Vec<LovOption>) -> Self {
        self.lovs.push((code.into(), options));
        self
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn lovs(&self) -> &[(String, Vec<LovOption>)] {
        &self.lovs
    }
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `SchemaContext`. Created by `SchemaContext::open()`.
pub struct SchemaContextBuilder {
    root: PathBuf,
    defaults: Option<SchemaDefaults>,
}

impl SchemaContextBuilder {
    /// Provide default definitions. Seeded on open; existing files are preserved.
    pub fn with_defaults(mut self, defaults: SchemaDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the context: create directories, seed defaults, load from disk.
    pub async fn build(self) -> Result<SchemaContext> {
        let root = self.root;

        fs::create_dir_all(root.join("fields")).await?;
        fs::create_dir_all(root.join("lov")).await?;

        if let Some(defaults) = self.defaults {
            seed_defaults(&root, &defaults).await?;
        }

        let mut ctx = SchemaContext {
            root,
            fields: Vec::new(),
            index: HashMap::new(),
            registry: LovRegistry::new(),
        };

        ctx.load_fields().await?;
        ctx.load_lovs().await?;

        debug!(
            fields = ctx.fields.len(),
            lovs = ctx.registry.len(),
            "schema context opened"
        );

        Ok(ctx)
    }
}

/// Seed defaults whose files don't already exist. Fields match by key,
/// lists of values by code.
async fn seed_defaults(root: &Path, defaults: &SchemaDefaults) -> Result<()> {
    for def in &defaults.fields {
        check_file_name(&def.key)?;
        let path = field_path(root, &def.key);
        if !path.exists() {
            let yaml = serde_yaml_ng::to_string(def)?;
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(key = %def.key, "seeded default field");
        }
    }

    for (code, options) in &defaults.lovs {
        check_file_name(code)?;
        let path = lov_path(root, code);
        if !path.exists() {
            let yaml = serde_yaml_ng::to_string(options)?;
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(%code, "seeded default list of values");
        }
    }

    Ok(())
}

/// Field keys and list-of-values codes become file names, so they must not
/// be empty, start with a dot, or contain a path separator.
fn check_file_name(name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(FieldsError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn field_path(root: &Path, key: &str) -> PathBuf {
    root.join("fields").join(format!("{key}.yaml"))
}

fn lov_path(root: &Path, code: &str) -> PathBuf {
    root.join("lov").join(format!("{code}.yaml"))
}

/// Schema for one record type, loaded from a directory:
/// ```text
/// <root>/
///   fields/   ← one <key>.yaml per field definition
///   lov/      ← one <CODE>.yaml per list of values
/// ```
pub struct SchemaContext {
    root: PathBuf,
    fields: Vec<FieldDef>,
    index: HashMap<String, usize>,
    registry: LovRegistry,
}

impl SchemaContext {
    /// Open or create a schema directory. Returns a builder for optional configuration.
    ///
    /// ```rust,ignore
    /// let ctx = SchemaContext::open(path)
    ///     .with_defaults(lead_defaults())
    ///     .build()
    ///     .await?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> SchemaContextBuilder {
        SchemaContextBuilder {
            root: root.into(),
            defaults: None,
        }
    }

    /// Open an existing schema directory without creating it.
    pub async fn load(root: impl Into<PathBuf>) -> Result<SchemaContext> {
        let root = root.into();
        if !root.join("fields").is_dir() {
            return Err(FieldsError::NotInitialized { path: root });
        }
        Self::open(root).build().await
    }

    // --- Field definitions ---

    pub fn get_field(&self, key: &str) -> Option<&FieldDef> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    /// Like `get_field`, but a missing key is an error.
    pub fn field(&self, key: &str) -> Result<&FieldDef> {
        self.get_field(key).ok_or_else(|| FieldsError::FieldNotFound {
            key: key.to_string(),
        })
    }

    /// All field definitions, ordered by `display_order` then key.
    pub fn all_fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.visible)
    }

    /// Write (create or update) a field definition. Persists to YAML immediately.
    pub async fn write_field(&mut self, def: &FieldDef) -> Result<()> {
        check_file_name(&def.key)?;
        let yaml = serde_yaml_ng::to_string(def)?;
        atomic_write(&field_path(&self.root, &def.key), yaml.as_bytes()).await?;

        match self.index.get(&def.key) {
            Some(&idx) => self.fields[idx] = def.clone(),
            None => self.fields.push(def.clone()),
        }
        self.reindex();
        Ok(())
    }

    // --- Lists of values ---

    pub fn registry(&self) -> &LovRegistry {
        &self.registry
    }

    /// Write (create or replace) a list of values. Persists to YAML immediately.
    pub async fn write_lov(&mut self, code: &str, options: Vec<LovOption>) -> Result<()> {
        check_file_name(code)?;
        // Validate before touching disk.
        let mut registry = self.registry.clone();
        registry.insert(code, options.clone())?;

        let yaml = serde_yaml_ng::to_string(&options)?;
        atomic_write(&lov_path(&self.root, code), yaml.as_bytes()).await?;
        self.registry = registry;
        Ok(())
    }

    // --- Sessions ---

    /// Start a form session over this schema.
    pub fn new_form(&self, initial: Option<Record>) -> FormState {
        FormState::new(self.fields.clone(), initial)
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // --- Internal ---

    fn reindex(&mut self) {
        self.fields
            .sort_by(|a, b| (a.display_order, &a.key).cmp(&(b.display_order, &b.key)));
        self.index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.key.clone(), i))
            .collect();
    }

    async fn load_fields(&mut self) -> Result<()> {
        let dir = self.root.join("fields");
        for path in yaml_files(&dir).await? {
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<FieldDef>(&content) {
                Ok(def) => {
                    if self.fields.iter().any(|f| f.key == def.key) {
                        return Err(FieldsError::DuplicateFieldName { key: def.key });
                    }
                    self.fields.push(def);
                }
                Err(e) => {
                    warn!(?path, %e, "skipping invalid field definition");
                }
            }
        }
        self.reindex();
        Ok(())
    }

    async fn load_lovs(&mut self) -> Result<()> {
        let dir = self.root.join("lov");
        for path in yaml_files(&dir).await? {
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<Vec<LovOption>>(&content) {
                Ok(options) => self.registry.insert(code, options)?,
                Err(e) => {
                    warn!(?path, %e, "skipping invalid list of values");
                }
            }
        }

        for f in self.fields.iter().filter(|f| f.data_type.is_enumerable()) {
            match f.lov_code.as_deref() {
                Some(code) if !self.registry.contains(code) => {
                    warn!(key = %f.key, %code, "field references unknown list of values");
                }
                None => warn!(key = %f.key, "enumerable field has no list of values"),
                _ => {}
            }
        }
        Ok(())
    }
}

/// All `.yaml` files directly in `dir`, sorted by name.
async fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Write to a temp file then rename for atomic persistence.
pub(crate) async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
