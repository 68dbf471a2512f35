use std::path::PathBuf;
use std::sync::Arc;

use crate::{config::Config, db::PreferenceStore, services::Catalog};

/// Shared application state
///
/// The catalog is read-only after startup, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub images_dir: PathBuf,
    pub pages_dir: PathBuf,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        preferences: Arc<dyn PreferenceStore>,
        images_dir: impl Into<PathBuf>,
        pages_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            preferences,
            images_dir: images_dir.into(),
            pages_dir: pages_dir.into(),
        }
    }

    /// Builds state using the directories named in `config`
    pub fn from_config(
        config: &Config,
        catalog: Catalog,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self::new(catalog, preferences, &config.images_dir, &config.pages_dir)
    }
}
