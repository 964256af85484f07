use anyhow::{Context, Result};
use plugkit_scaffold::{
    Completion, ModuleName, OperationController, OperationOutcome, RegistryKind, StepReport,
    StepStatus,
};
use std::path::Path;

/// Creates module `name` and prints one line per step.
///
/// # Errors
/// Returns an error if the operation could not run to completion.
pub fn create_module(controller: &OperationController, name: &ModuleName) -> Result<Completion> {
    let outcome = controller
        .create(name)
        .with_context(|| format!("Failed to create module '{name}'"))?;
    Ok(print_outcome(controller.layout().root(), &outcome))
}

/// Deletes module `name` and prints one line per step.
///
/// # Errors
/// Returns an error if the operation could not run to completion.
pub fn delete_module(controller: &OperationController, name: &ModuleName) -> Result<Completion> {
    let outcome = controller
        .delete(name)
        .with_context(|| format!("Failed to delete module '{name}'"))?;
    Ok(print_outcome(controller.layout().root(), &outcome))
}

/// Prints a table of generated modules and the registries mentioning each.
///
/// # Errors
/// Returns an error if the project root or a registry cannot be read.
pub fn list_modules(controller: &OperationController) -> Result<Completion> {
    let root = controller.layout().root();
    let modules = controller.list().context("Failed to list modules")?;

    if modules.is_empty() {
        println!("ℹ️ No generated modules found in '{}'.", root.display());
        return Ok(Completion::Success);
    }

    println!("\nModules in {}:\n", root.display());
    print!("{:<24}", "Module");
    for kind in RegistryKind::CREATE_ORDER {
        print!(" {:<20}", kind.to_string());
    }
    println!();
    println!("{:-<108}", "");

    for module in &modules {
        print!("{:<24}", module.name.as_str());
        for kind in RegistryKind::CREATE_ORDER {
            let mark = if module.registered_in.contains(&kind) { "yes" } else { "-" };
            print!(" {mark:<20}");
        }
        println!();
    }
    println!();

    let incomplete = modules.iter().filter(|m| !m.is_fully_registered()).count();
    if incomplete > 0 {
        println!("⚠️ {incomplete} module(s) missing from at least one registry.");
    }
    Ok(Completion::Success)
}

fn print_outcome(root: &Path, outcome: &OperationOutcome) -> Completion {
    for step in outcome.steps() {
        println!("{} {}", marker(step.status), relative(root, step));
    }

    let completion = outcome.completion();
    let verb = outcome.operation();
    let name = outcome.module();
    match completion {
        Completion::Success => println!("✅ Module '{name}': {verb} succeeded"),
        Completion::Partial => println!("⚠️ Module '{name}': {verb} finished partially"),
    }
    completion
}

const fn marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Created | StepStatus::Updated | StepStatus::Removed => "✅",
        StepStatus::AlreadyExists | StepStatus::NotFound => "❌",
        StepStatus::Unchanged | StepStatus::Skipped | StepStatus::RolledBack => "ℹ️",
    }
}

fn relative(root: &Path, step: &StepReport) -> StepReport {
    let target = step.target.strip_prefix(root).unwrap_or(&step.target).to_path_buf();
    StepReport { target, ..step.clone() }
}
