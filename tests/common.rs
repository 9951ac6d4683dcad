use shctx::config::{ACTIVATE_FILE, CURRENT_FILE};
use shctx::context::activator::Activator;
use shctx::context::registry::ContextRegistry;
use shctx::error::{Result, ShctxError};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch process environment variables.
#[allow(dead_code)]
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// A registry root inside a temp directory, with builders for the
/// category/config tree the registry only ever observes.
pub struct TestEnvironment {
    // TempDir is kept so cleanup happens when TestEnvironment is dropped
    #[allow(dead_code)]
    temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("contexts");
        fs::create_dir_all(&root).expect("Failed to create registry root");
        Self { temp_dir, root }
    }

    pub fn registry(&self) -> ContextRegistry {
        ContextRegistry::with_root(Some(&self.root)).expect("Failed to open registry")
    }

    #[allow(dead_code)]
    pub fn create_category(&self, category: &str) -> PathBuf {
        let dir = self.root.join(category);
        fs::create_dir_all(&dir).expect("Failed to create category");
        dir
    }

    /// A configuration with a harmless default payload.
    pub fn create_config(&self, category: &str, config: &str) -> PathBuf {
        self.create_config_with_payload(category, config, "export SHCTX_SAMPLE='1'\n")
    }

    pub fn create_config_with_payload(
        &self,
        category: &str,
        config: &str,
        payload: &str,
    ) -> PathBuf {
        let dir = self.root.join(category).join(config);
        fs::create_dir_all(&dir).expect("Failed to create configuration");
        let path = dir.join(ACTIVATE_FILE);
        fs::write(&path, payload).expect("Failed to write activation payload");
        path
    }

    /// A configuration directory without an activation payload (invalid).
    #[allow(dead_code)]
    pub fn create_bare_config(&self, category: &str, config: &str) -> PathBuf {
        let dir = self.root.join(category).join(config);
        fs::create_dir_all(&dir).expect("Failed to create configuration");
        dir
    }

    pub fn record_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    /// Current bytes of the selection record; empty if the file is absent.
    pub fn record_content(&self) -> String {
        fs::read_to_string(self.record_path()).unwrap_or_default()
    }
}

/// Activator double that always succeeds without touching anything.
pub struct NoopActivator;

impl Activator for NoopActivator {
    fn apply(&self, _payload: &Path) -> Result<()> {
        Ok(())
    }
}

/// Activator double that always reports a failed application.
#[allow(dead_code)]
pub struct FailingActivator;

impl Activator for FailingActivator {
    fn apply(&self, _payload: &Path) -> Result<()> {
        Err(ShctxError::ActivationFailed {
            reason: "exit status: 1".to_string(),
        })
    }
}

/// Activator double that remembers every payload it was asked to apply.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingActivator {
    pub applied: RefCell<Vec<PathBuf>>,
}

impl Activator for RecordingActivator {
    fn apply(&self, payload: &Path) -> Result<()> {
        self.applied.borrow_mut().push(payload.to_path_buf());
        Ok(())
    }
}
