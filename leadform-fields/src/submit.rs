//! Submit collaborator: receives a record once the form validates cleanly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::context::atomic_write;
use crate::error::{FieldsError, Result};
use crate::value::Record;

/// Downstream consumer of a completed record.
///
/// Only called after a full validation pass with no failures. May suspend;
/// the form awaits it to completion.
#[async_trait]
pub trait RecordSubmitter: Send + Sync {
    async fn submit(&self, record: &Record) -> Result<()>;
}

/// Writes the submitted record to a YAML file, replacing any previous content.
pub struct YamlFileSubmitter {
    path: PathBuf,
}

impl YamlFileSubmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSubmitter for YamlFileSubmitter {
    async fn submit(&self, record: &Record) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(record)?;
        atomic_write(&self.path, yaml.as_bytes())
            .await
            .map_err(|e| FieldsError::SubmitFailed {
                message: format!("{}: {e}", self.path.display()),
            })?;
        debug!(path = %self.path.display(), fields = record.len(), "record written");
        Ok(())
    }
}
