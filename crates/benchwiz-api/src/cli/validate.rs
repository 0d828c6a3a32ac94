//! `benchwiz validate` -- check wizard graphs without serving traffic.

use std::path::Path;

use anyhow::Result;
use console::style;

use benchwiz_infra::connection::fixture::FixtureConnectionStore;
use benchwiz_infra::wizard::load_wizard_configs;

use crate::state::build_wizard_service;

/// Load every graph in `dir` and run the startup checks against the
/// registered adapters. No connection store is contacted.
pub async fn validate(dir: &Path, json: bool) -> Result<()> {
    let configs = load_wizard_configs(dir).await?;
    let summary: Vec<(String, usize)> = configs
        .iter()
        .map(|c| (c.provider.clone(), c.steps.len()))
        .collect();

    build_wizard_service(configs, FixtureConnectionStore::default())?;

    if json {
        let report: Vec<serde_json::Value> = summary
            .iter()
            .map(|(provider, steps)| serde_json::json!({ "provider": provider, "steps": steps }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "valid": true, "wizards": report }))?
        );
        return Ok(());
    }

    println!();
    for (provider, steps) in &summary {
        println!(
            "  {} {} ({steps} steps)",
            style("✓").green(),
            style(provider).cyan()
        );
    }
    println!();
    println!(
        "  {} wizard graph(s) in {} are valid",
        summary.len(),
        style(dir.display()).dim()
    );
    println!();
    Ok(())
}
