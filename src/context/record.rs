use crate::config::CURRENT_FILE;
use crate::error::{Result, ShctxError};
use crate::path_utils::safe_parent_for_creation;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// The persisted category -> active configuration mapping.
///
/// One `category=config` line per category, in insertion order. Keys are
/// unique: updating a category drops its previous line before appending the
/// new one.
#[derive(Debug, Default)]
pub struct SelectionRecord {
    entries: Vec<(String, String)>,
}

impl SelectionRecord {
    /// A missing record file is an empty record, not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Blank and malformed lines are skipped; a duplicated category resolves
    /// to its last occurrence. Writers never produce either.
    fn parse(content: &str) -> Self {
        let mut record = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((category, config)) = line.split_once('=')
                && !category.is_empty()
            {
                record.set(category, config);
            }
        }
        record
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, config)| config.as_str())
    }

    pub fn set(&mut self, category: &str, config: &str) {
        self.entries.retain(|(name, _)| name != category);
        self.entries
            .push((category.to_string(), config.to_string()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write-temp-then-rename, so a crash mid-write never truncates the
    /// record file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = safe_parent_for_creation(path) {
            fs::create_dir_all(parent)?;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| CURRENT_FILE.into());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp_name = format!(".{file_name}.tmp.{nanos}");
        let tmp_path: PathBuf = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(tmp_name),
            _ => PathBuf::from(tmp_name),
        };

        fs::write(&tmp_path, self.render()).map_err(|source| ShctxError::RecordWrite {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(windows)]
        {
            // Rename does not replace on Windows. Removing first loses
            // atomicity but still keeps partial writes out of the record.
            if path.exists() {
                fs::remove_file(path).map_err(|source| ShctxError::RecordWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::rename(&tmp_path, path).map_err(|source| ShctxError::RecordWrite {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (category, config) in &self.entries {
            out.push_str(category);
            out.push('=');
            out.push_str(config);
            out.push('\n');
        }
        out
    }
}
