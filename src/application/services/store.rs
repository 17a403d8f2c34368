//! JSON persistence of the tree registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::registry::TreeRegistry;
use crate::application::ApplicationResult;
use crate::domain::{DomainError, StoreDocument};
use crate::infrastructure::traits::FileSystem;

/// Serializes a registry to the pretty-printed store format.
pub fn serialize_registry(registry: &TreeRegistry) -> ApplicationResult<String> {
    serde_json::to_string_pretty(&registry.to_document())
        .map_err(|e| DomainError::CorruptData(format!("serialize store: {e}")).into())
}

/// Parses the store format; any malformed input is `CorruptData`.
///
/// Each tree level nests two JSON containers, so serde_json's default
/// recursion limit would reject trees deeper than about 64 nodes. The limit
/// is lifted and the stack grows on demand instead.
pub fn deserialize_registry(content: &str) -> ApplicationResult<TreeRegistry> {
    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let document = StoreDocument::deserialize(serde_stacker::Deserializer::new(&mut de))
        .and_then(|document| de.end().map(|()| document))
        .map_err(|e| DomainError::CorruptData(format!("parse store: {e}")))?;
    Ok(TreeRegistry::from_document(&document)?)
}

/// Reads and writes the registry file through the `FileSystem` boundary.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl TreeStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the registry; a missing file is an empty registry.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> ApplicationResult<TreeRegistry> {
        if !self.fs.exists(&self.path) {
            debug!("no store file yet, starting empty");
            return Ok(TreeRegistry::new());
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read store", &self.path)?;
        let registry = deserialize_registry(&content)?;
        debug!("loaded {} trees", registry.len());
        Ok(registry)
    }

    #[instrument(level = "debug", skip(self, registry), fields(path = %self.path.display()))]
    pub fn save(&self, registry: &TreeRegistry) -> ApplicationResult<()> {
        let content = serialize_registry(registry)?;
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create store directory", &self.path)?;
        self.fs
            .write_atomic(&self.path, &content)
            .with_path_context("write store", &self.path)?;
        debug!("saved {} trees", registry.len());
        Ok(())
    }
}
