use crate::config::{ENV_ROOT_DIR, resolve_root_with};
use crate::context::command as context_command;
use crate::context::registry::ContextRegistry;
use crate::shell::command as shell_command;
use crate::shell::emit::ShellSyntax;
use crate::vars::command::{self as vars_command, VarArgs};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Root directory holding the category tree (default: ~/.config/shctx)
    #[arg(short = 'R', long = "root", global = true)]
    pub root: Option<PathBuf>,

    /// Print the resolved root directory path and exit
    #[arg(long)]
    pub print_root_path: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories, or the configurations inside one
    #[command(alias = "ls")]
    List { category: Option<String> },
    /// Activate a configuration, interactively when none is named
    #[command(name = "use", alias = "switch")]
    Use {
        category: String,
        config: Option<String>,
    },
    /// Show the active configuration for one category, or all of them
    #[command(alias = "current")]
    Show { category: Option<String> },
    /// Print shell source lines for the recorded selections
    ///
    /// Add `eval "$(shctx env)"` to a profile script to restore the active
    /// contexts in every new shell.
    Env {
        /// Shell syntax to emit (defaults to the platform shell)
        #[arg(long, value_enum)]
        syntax: Option<SyntaxArg>,
    },
    /// Edit the variables a configuration exports
    #[command(alias = "vars")]
    Var(VarArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SyntaxArg {
    Posix,
    Powershell,
}

impl From<SyntaxArg> for ShellSyntax {
    fn from(value: SyntaxArg) -> Self {
        match value {
            SyntaxArg::Posix => Self::Posix,
            SyntaxArg::Powershell => Self::PowerShell,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_root_path {
        let env_override = env::var(ENV_ROOT_DIR).ok();
        let root = resolve_root_with(cli.root.as_deref(), env_override.as_deref())?;
        println!("{}", root.display());
        return Ok(());
    }

    let Some(command) = cli.command.as_ref() else {
        let mut command = Cli::command();
        command.print_help()?;
        println!();
        return Ok(());
    };

    let registry = ContextRegistry::with_root(cli.root.as_deref())?;

    match command {
        Commands::List { category } => context_command::list(&registry, category.as_deref()),
        Commands::Use { category, config } => {
            context_command::use_context(&registry, category, config.as_deref())
        }
        Commands::Show { category } => context_command::show(&registry, category.as_deref()),
        Commands::Env { syntax } => shell_command::env(&registry, syntax.map(Into::into)),
        Commands::Var(args) => vars_command::run(&registry, args),
    }
}
