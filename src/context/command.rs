use crate::context::activator::ShellActivator;
use crate::context::interactive;
use crate::context::registry::ContextRegistry;
use anyhow::Result;

pub fn list(registry: &ContextRegistry, category: Option<&str>) -> Result<()> {
    match category {
        Some(category) => {
            let configs = registry.list_configurations(category)?;
            if configs.is_empty() {
                println!("{}", t!("messages.no_configurations", category = category));
            } else {
                for config in configs {
                    println!("{config}");
                }
            }
        }
        None => {
            for category in registry.list_categories()? {
                println!("{category}");
            }
        }
    }

    Ok(())
}

pub fn use_context(
    registry: &ContextRegistry,
    category: &str,
    config: Option<&str>,
) -> Result<()> {
    let activator = ShellActivator::new();

    let config = match config {
        Some(config) => {
            registry.activate(category, config, &activator)?;
            config.to_string()
        }
        None => interactive::activate_interactive(registry, category, &activator)?,
    };

    println!(
        "{}",
        t!("messages.activated", category = category, config = config)
    );
    println!("{}", t!("messages.reload_hint"));
    Ok(())
}

pub fn show(registry: &ContextRegistry, category: Option<&str>) -> Result<()> {
    match category {
        Some(category) => match registry.current(category)? {
            Some(config) => println!("{category}={config}"),
            None => println!("{}", t!("messages.no_context_set", category = category)),
        },
        None => {
            let selections = registry.selections()?;
            if selections.is_empty() {
                println!("{}", t!("messages.no_contexts"));
            } else {
                for (category, config) in selections {
                    println!("{category}={config}");
                }
            }
        }
    }

    Ok(())
}
