use crate::error::{Result, ShctxError};
use crate::shell::emit::{self, ShellSyntax};
use std::env;
use std::path::Path;
use std::process::Command;

const DEFAULT_SHELL: &str = "sh";

/// Applies an activation payload. The payload is opaque: only success or
/// failure of the application matters to the registry.
pub trait Activator {
    fn apply(&self, payload: &Path) -> Result<()>;
}

/// Sources the payload through the user's shell. A non-zero exit, or a
/// shell that cannot be spawned at all, is an activation failure.
pub struct ShellActivator {
    shell: String,
}

impl ShellActivator {
    pub fn new() -> Self {
        let shell = if cfg!(windows) {
            "powershell".to_string()
        } else {
            env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string())
        };
        Self { shell }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellActivator {
    fn default() -> Self {
        Self::new()
    }
}

impl Activator for ShellActivator {
    fn apply(&self, payload: &Path) -> Result<()> {
        let syntax = ShellSyntax::for_current_platform();
        let flag = match syntax {
            ShellSyntax::Posix => "-c",
            ShellSyntax::PowerShell => "-Command",
        };

        let status = Command::new(&self.shell)
            .arg(flag)
            .arg(emit::source_line(payload, syntax))
            .status()
            .map_err(|e| ShctxError::ActivationFailed {
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ShctxError::ActivationFailed {
                reason: status.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn apply_succeeds_for_clean_payload() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(&payload, "export SHCTX_SMOKE=1\n").unwrap();

        let activator = ShellActivator::with_shell("sh");
        assert!(activator.apply(&payload).is_ok());
    }

    #[test]
    fn apply_fails_for_failing_payload() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(&payload, "exit 3\n").unwrap();

        let activator = ShellActivator::with_shell("sh");
        let result = activator.apply(&payload);
        assert!(matches!(result, Err(ShctxError::ActivationFailed { .. })));
    }

    #[test]
    fn apply_fails_when_shell_is_missing() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(&payload, "true\n").unwrap();

        let activator = ShellActivator::with_shell("shctx-no-such-shell");
        let result = activator.apply(&payload);
        assert!(matches!(result, Err(ShctxError::ActivationFailed { .. })));
    }
}
