use crate::error::{Result, ShctxError};
use crate::path_utils::validate_path_str;
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_ROOT_DIR: &str = "SHCTX_ROOT";
pub const ENV_LANG: &str = "SHCTX_LANG";
pub const APP_NAME: &str = "shctx";
pub const ACTIVATE_FILE: &str = "activate";
pub const CURRENT_FILE: &str = ".current";
pub const SETTINGS_FILE: &str = "settings.toml";

/// Optional user settings, read from `settings.toml` in the default config
/// directory. Both keys are overridable per invocation (`--root`, `--syntax`).
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub root: Option<String>,
    pub syntax: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        match Self::settings_file_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ShctxError::Config {
            message: t!("errors.settings_parse", path = path.display(), error = e).to_string(),
        })
    }

    pub fn settings_file_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }
}

pub fn resolve_root(cli_override: Option<&Path>) -> Result<PathBuf> {
    let env_override = env::var(ENV_ROOT_DIR).ok();
    resolve_root_with(cli_override, env_override.as_deref())
}

pub fn resolve_root_with(cli_override: Option<&Path>, env_override: Option<&str>) -> Result<PathBuf> {
    if cli_override.is_some() || env_override.is_some() {
        return resolve_root_from(cli_override, env_override, &Settings::default());
    }
    resolve_root_from(None, None, &Settings::load()?)
}

/// Precedence: CLI flag, then environment variable, then the settings file,
/// then the platform config directory.
pub fn resolve_root_from(
    cli_override: Option<&Path>,
    env_override: Option<&str>,
    settings: &Settings,
) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        validate_path_str(&path.to_string_lossy()).map_err(|e| ShctxError::Config {
            message: t!("errors.invalid_root_dir", error = e).to_string(),
        })?;
        return Ok(path.to_path_buf());
    }

    if let Some(env_root) = env_override {
        validate_path_str(env_root).map_err(|e| ShctxError::Config {
            message: t!("errors.invalid_root_dir_env", error = e).to_string(),
        })?;
        return Ok(PathBuf::from(env_root));
    }

    if let Some(root) = settings.root.as_deref() {
        validate_path_str(root).map_err(|e| ShctxError::Config {
            message: t!("errors.invalid_root_dir_settings", error = e).to_string(),
        })?;
        return Ok(expand_home(root));
    }

    let project_dirs = ProjectDirs::from("", "", APP_NAME).ok_or_else(|| ShctxError::Config {
        message: t!("errors.not_find_root_dir").to_string(),
    })?;
    Ok(project_dirs.config_dir().to_path_buf())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Resolved registry root plus the path conventions below it.
pub struct Config {
    root: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::with_root(None)
    }

    pub fn with_root(root_override: Option<&Path>) -> Result<Self> {
        let root = resolve_root(root_override)?;
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.root.join(category)
    }

    pub fn config_dir(&self, category: &str, config: &str) -> PathBuf {
        self.category_dir(category).join(config)
    }

    pub fn activate_path(&self, category: &str, config: &str) -> PathBuf {
        self.config_dir(category, config).join(ACTIVATE_FILE)
    }

    pub fn record_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }
}
