//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ForestService, SessionManager, TreeStore};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// In-flight build sessions
    pub sessions: SessionManager,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            sessions: SessionManager::new(),
        }
    }

    pub fn tree_store(&self) -> TreeStore {
        TreeStore::new(Arc::clone(&self.fs), self.settings.store_path.clone())
    }

    /// Opens the forest service on the configured store.
    pub fn forest(&self) -> ApplicationResult<ForestService> {
        ForestService::open(self.tree_store())
    }
}
