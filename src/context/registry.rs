use crate::config::{ACTIVATE_FILE, Config};
use crate::context::activator::Activator;
use crate::context::record::SelectionRecord;
use crate::error::{Result, ShctxError};
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the category/config tree and the selection record.
///
/// The registry only observes the tree: categories and configurations are
/// created and destroyed by external filesystem operations. At most one
/// configuration is active per category.
pub struct ContextRegistry {
    config: Config,
}

impl ContextRegistry {
    pub fn new() -> Result<Self> {
        Self::with_root(None)
    }

    pub fn with_root(root_override: Option<&Path>) -> Result<Self> {
        Ok(Self {
            config: Config::with_root(root_override)?,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Direct subdirectories of the root, sorted. Dot entries are not
    /// categories. An empty root is an empty list, not an error.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut categories = Vec::new();
        for entry in fs::read_dir(self.config.root())? {
            let path = entry?.path();
            if path.is_dir()
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
                && !name.starts_with('.')
            {
                categories.push(name.to_string());
            }
        }
        categories.sort();
        Ok(categories)
    }

    /// Subdirectories of the category that carry an activation payload,
    /// sorted. A category with no valid configurations is an empty list.
    pub fn list_configurations(&self, category: &str) -> Result<Vec<String>> {
        let category_dir = self.config.category_dir(category);
        if !category_dir.is_dir() {
            return Err(ShctxError::CategoryNotFound {
                category: category.to_string(),
            });
        }

        let mut configs = Vec::new();
        for entry in fs::read_dir(&category_dir)? {
            let path = entry?.path();
            if path.is_dir()
                && path.join(ACTIVATE_FILE).is_file()
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
            {
                configs.push(name.to_string());
            }
        }
        configs.sort();
        Ok(configs)
    }

    /// Applies the payload, then records the selection. The record is only
    /// touched after the activator reports success, so a failed activation
    /// leaves it byte-identical.
    pub fn activate(&self, category: &str, config: &str, activator: &dyn Activator) -> Result<()> {
        if !self.config.category_dir(category).is_dir() {
            return Err(ShctxError::CategoryNotFound {
                category: category.to_string(),
            });
        }

        let payload = self.config.activate_path(category, config);
        if !payload.is_file() {
            return Err(ShctxError::ConfigNotFound {
                category: category.to_string(),
                config: config.to_string(),
            });
        }

        activator.apply(&payload)?;

        let record_path = self.config.record_path();
        let mut record = SelectionRecord::load(&record_path)?;
        record.set(category, config);
        record.save(&record_path)
    }

    /// The recorded active configuration for a category, if any. Absence is
    /// a reportable signal, not an error.
    pub fn current(&self, category: &str) -> Result<Option<String>> {
        let record = SelectionRecord::load(&self.config.record_path())?;
        Ok(record.get(category).map(str::to_string))
    }

    /// The full selection record, one entry per category.
    pub fn selections(&self) -> Result<Vec<(String, String)>> {
        let record = SelectionRecord::load(&self.config.record_path())?;
        Ok(record.entries().to_vec())
    }

    /// Payload paths for recorded selections that still exist on disk.
    /// Entries whose directories were deleted are skipped, not repaired.
    pub fn active_payloads(&self) -> Result<Vec<PathBuf>> {
        let mut payloads = Vec::new();
        for (category, config) in self.selections()? {
            let payload = self.config.activate_path(&category, &config);
            if payload.is_file() {
                payloads.push(payload);
            }
        }
        Ok(payloads)
    }
}
