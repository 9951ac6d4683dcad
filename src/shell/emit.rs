use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellSyntax {
    Posix,
    PowerShell,
}

impl ShellSyntax {
    pub fn for_current_platform() -> Self {
        if cfg!(windows) {
            ShellSyntax::PowerShell
        } else {
            ShellSyntax::Posix
        }
    }

    /// Parses the `syntax` settings key.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "posix" | "sh" => Some(ShellSyntax::Posix),
            "powershell" | "pwsh" => Some(ShellSyntax::PowerShell),
            _ => None,
        }
    }
}

/// One dot-source line per payload, ready for the host shell to eval.
pub fn render_source_lines(payloads: &[impl AsRef<Path>], syntax: ShellSyntax) -> Vec<String> {
    payloads
        .iter()
        .map(|payload| source_line(payload.as_ref(), syntax))
        .collect()
}

pub fn source_line(payload: &Path, syntax: ShellSyntax) -> String {
    let path = payload.display().to_string();
    let quoted = match syntax {
        ShellSyntax::Posix => quote_posix_single(&path),
        ShellSyntax::PowerShell => quote_powershell_single(&path),
    };
    format!(". {quoted}")
}

pub(crate) fn quote_posix_single(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

pub(crate) fn quote_powershell_single(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
