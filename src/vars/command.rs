use crate::context::registry::ContextRegistry;
use crate::error::ShctxError;
use crate::vars::payload;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::env;
use std::fs;

#[derive(Args)]
pub struct VarArgs {
    #[command(subcommand)]
    pub command: VarCommands,
}

#[derive(Subcommand)]
pub enum VarCommands {
    /// Set variables in a configuration's activation payload
    Set {
        category: String,
        config: String,
        /// KEY=VALUE pairs
        #[arg(required = true)]
        vars: Vec<String>,
    },
    /// Remove variables from a configuration's activation payload
    Unset {
        category: String,
        config: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Capture the current values of environment variables into a payload
    Save {
        category: String,
        config: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List the variables a configuration exports
    List {
        category: String,
        config: String,
    },
}

pub fn run(registry: &ContextRegistry, args: &VarArgs) -> Result<()> {
    match &args.command {
        VarCommands::Set {
            category,
            config,
            vars,
        } => handle_set(registry, category, config, vars),
        VarCommands::Unset {
            category,
            config,
            keys,
        } => handle_unset(registry, category, config, keys),
        VarCommands::Save {
            category,
            config,
            keys,
        } => handle_save(registry, category, config, keys),
        VarCommands::List { category, config } => handle_list(registry, category, config),
    }
}

fn handle_set(
    registry: &ContextRegistry,
    category: &str,
    config: &str,
    assignments: &[String],
) -> Result<()> {
    let vars = parse_assignments(assignments)?;

    fs::create_dir_all(registry.config().config_dir(category, config))?;
    let path = registry.config().activate_path(category, config);
    payload::set_vars(&path, &vars)?;

    println!(
        "{}",
        t!(
            "vars.set_success",
            count = vars.len(),
            category = category,
            config = config
        )
    );
    Ok(())
}

fn handle_unset(
    registry: &ContextRegistry,
    category: &str,
    config: &str,
    keys: &[String],
) -> Result<()> {
    let path = registry.config().activate_path(category, config);
    if !path.is_file() {
        return Err(ShctxError::ConfigNotFound {
            category: category.to_string(),
            config: config.to_string(),
        }
        .into());
    }

    let removed = payload::unset_vars(&path, keys)?;
    println!(
        "{}",
        t!(
            "vars.unset_success",
            count = removed,
            category = category,
            config = config
        )
    );
    Ok(())
}

fn handle_save(
    registry: &ContextRegistry,
    category: &str,
    config: &str,
    keys: &[String],
) -> Result<()> {
    let mut vars = Vec::with_capacity(keys.len());
    for key in keys {
        let value = env::var(key).map_err(|_| ShctxError::Config {
            message: t!("vars.env_not_set", key = key).to_string(),
        })?;
        vars.push((key.clone(), value));
    }

    fs::create_dir_all(registry.config().config_dir(category, config))?;
    let path = registry.config().activate_path(category, config);
    payload::set_vars(&path, &vars)?;

    println!(
        "{}",
        t!(
            "vars.save_success",
            count = vars.len(),
            category = category,
            config = config
        )
    );
    Ok(())
}

fn handle_list(registry: &ContextRegistry, category: &str, config: &str) -> Result<()> {
    let path = registry.config().activate_path(category, config);
    if !path.is_file() {
        return Err(ShctxError::ConfigNotFound {
            category: category.to_string(),
            config: config.to_string(),
        }
        .into());
    }

    let vars = payload::list_vars(&path)?;
    if vars.is_empty() {
        println!("{}", t!("vars.none"));
        return Ok(());
    }

    for (key, value) in vars {
        let shown = if is_sensitive_key(&key) {
            payload::mask_secret(&value)
        } else {
            value
        };
        println!("{key}={shown}");
    }
    Ok(())
}

fn is_sensitive_key(key: &str) -> bool {
    key.contains("KEY") || key.contains("TOKEN") || key.contains("SECRET")
}

fn parse_assignments(assignments: &[String]) -> Result<Vec<(String, String)>> {
    let mut vars = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            return Err(ShctxError::Config {
                message: t!("vars.invalid_assignment", assignment = assignment).to_string(),
            }
            .into());
        };
        vars.push((key.to_string(), value.to_string()));
    }
    Ok(vars)
}
