//! `benchwiz step` -- resolve a single wizard step from the command line.

use anyhow::{bail, Result};
use console::style;

use benchwiz_types::wizard::{
    BenchmarkConfiguration, SelectionType, WizardStepRequest, WizardStepResponse,
};

use crate::state::AppState;

/// Parse `--answer step=a,b` flags into accumulated answers.
///
/// Repeating a step appends to its values. Empty values are dropped.
pub fn parse_answers(raw: &[String]) -> Result<BenchmarkConfiguration> {
    let mut answers = BenchmarkConfiguration::new();
    for entry in raw {
        let Some((step, values)) = entry.split_once('=') else {
            bail!("invalid answer '{entry}', expected STEP=VALUE[,VALUE...]");
        };
        let step = step.trim();
        if step.is_empty() {
            bail!("invalid answer '{entry}', step id must not be empty");
        }
        answers.entry(step.to_string()).or_default().extend(
            values
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }
    Ok(answers)
}

pub async fn run_step(
    state: &AppState,
    provider: &str,
    project_id: &str,
    current_step: Option<String>,
    answers: &[String],
    json: bool,
) -> Result<()> {
    let benchmark_configuration = parse_answers(answers)?;
    let request = WizardStepRequest {
        current_step,
        benchmark_configuration: Some(benchmark_configuration),
    };

    let response = state
        .wizard_service
        .get_wizard_step(provider, request, project_id)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_step(&response);
    }
    Ok(())
}

fn print_step(step: &WizardStepResponse) {
    println!();
    println!(
        "  {} {}  {}",
        style(format!("[{}/{}]", step.step_index, step.total_steps)).dim(),
        style(&step.title).bold(),
        style(format!("({})", step.current_step)).dim()
    );
    if let Some(description) = &step.description {
        println!("  {}", style(description).dim());
    }
    println!();

    if step.options.is_empty() {
        println!("  {}", style("No options for this step.").dim());
    } else {
        let marker = match step.selection_type {
            SelectionType::Single => "( )",
            SelectionType::MultiSelect => "[ ]",
        };
        for option in &step.options {
            println!(
                "  {} {}  {}",
                style(marker).cyan(),
                option.display_name,
                style(&option.id).dim()
            );
        }
    }

    println!();
    match &step.next_step {
        Some(next) => println!("  {} {}", style("Next:").bold(), style(next).cyan()),
        None => println!("  {}", style("Last step.").green()),
    }
    println!();
}
