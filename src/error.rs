use anyhow::Result as _Result;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShctxError {
    #[error("Category not found: {category}")]
    CategoryNotFound { category: String },

    #[error("Configuration not found: {category}/{config}")]
    ConfigNotFound { category: String, config: String },

    #[error("No configurations available in category: {category}")]
    NoConfigurations { category: String },

    #[error("Activation failed: {reason}")]
    ActivationFailed { reason: String },

    #[error("Selection aborted")]
    Aborted,

    #[error("Invalid variable name(s): {name}")]
    InvalidVarName { name: String },

    #[error("Config Error: {message}")]
    Config { message: String },

    #[error("Failed to write selection record {path}: {source}")]
    RecordWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inquire Error: {0}")]
    Inquire(#[from] inquire::InquireError),
}

impl ShctxError {
    pub fn display_localized(&self) -> String {
        match self {
            ShctxError::CategoryNotFound { category } => {
                t!("errors.category_not_found", category = category).to_string()
            }
            ShctxError::ConfigNotFound { category, config } => {
                t!("errors.config_not_found", category = category, config = config).to_string()
            }
            ShctxError::NoConfigurations { category } => {
                t!("errors.no_configurations", category = category).to_string()
            }
            ShctxError::ActivationFailed { reason } => {
                t!("errors.activation_failed", reason = reason).to_string()
            }
            ShctxError::Aborted => t!("errors.aborted").to_string(),
            ShctxError::InvalidVarName { name } => {
                t!("errors.invalid_var_name", name = name).to_string()
            }
            ShctxError::Config { message } => {
                t!("errors.config_error", message = message).to_string()
            }
            ShctxError::RecordWrite { path, source } => t!(
                "errors.record_write_failed",
                path = path.display(),
                error = source
            )
            .to_string(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = _Result<T, ShctxError>;
