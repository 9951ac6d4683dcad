use crate::context::activator::Activator;
use crate::context::registry::ContextRegistry;
use crate::error::{Result, ShctxError};
use inquire::validator::Validation;
use inquire::{CustomType, InquireError};

/// Numbered selection over a category's configurations, then a normal
/// activate. Out-of-range or non-numeric input re-prompts in place; closing
/// the input stream aborts.
pub fn activate_interactive(
    registry: &ContextRegistry,
    category: &str,
    activator: &dyn Activator,
) -> Result<String> {
    let configs = registry.list_configurations(category)?;
    if configs.is_empty() {
        return Err(ShctxError::NoConfigurations {
            category: category.to_string(),
        });
    }

    println!("{}", t!("interactive.available", category = category));
    for (index, name) in configs.iter().enumerate() {
        println!("  {}) {}", index + 1, name);
    }

    let choice = prompt_selection(configs.len())?;
    let config = configs[choice - 1].clone();
    registry.activate(category, &config, activator)?;
    Ok(config)
}

fn prompt_selection(count: usize) -> Result<usize> {
    let prompt = t!("interactive.select_number", max = count);
    let parse_error = t!("interactive.invalid_selection");
    let range_error = t!("interactive.out_of_range", max = count).to_string();

    let result = CustomType::<usize>::new(&prompt)
        .with_error_message(&parse_error)
        .with_validator(move |choice: &usize| {
            if (1..=count).contains(choice) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(range_error.clone().into()))
            }
        })
        .prompt();

    match result {
        Ok(choice) => Ok(choice),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(ShctxError::Aborted)
        }
        Err(e) => Err(ShctxError::Inquire(e)),
    }
}
