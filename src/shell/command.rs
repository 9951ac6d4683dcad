use crate::config::Settings;
use crate::context::registry::ContextRegistry;
use crate::error::ShctxError;
use crate::shell::emit::{self, ShellSyntax};
use anyhow::Result;

/// Prints one source line per live recorded selection. A profile script
/// applies them with `eval "$(shctx env)"`, restoring the contexts in every
/// new shell.
pub fn env(registry: &ContextRegistry, syntax: Option<ShellSyntax>) -> Result<()> {
    let syntax = match syntax {
        Some(syntax) => syntax,
        None => default_syntax()?,
    };

    for line in emit::render_source_lines(&registry.active_payloads()?, syntax) {
        println!("{line}");
    }

    Ok(())
}

fn default_syntax() -> Result<ShellSyntax> {
    let settings = Settings::load()?;
    match settings.syntax.as_deref() {
        Some(name) => ShellSyntax::parse(name).ok_or_else(|| {
            ShctxError::Config {
                message: t!("errors.unknown_syntax", name = name).to_string(),
            }
            .into()
        }),
        None => Ok(ShellSyntax::for_current_platform()),
    }
}
