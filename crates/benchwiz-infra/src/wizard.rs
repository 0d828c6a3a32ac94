//! Loads wizard step graphs from a directory of `*.json` files.

use std::path::{Path, PathBuf};

use anyhow::Context;

use benchwiz_core::config_store::parse_wizard_config_json;
use benchwiz_types::wizard::WizardConfig;

/// Parse every `*.json` file in `dir`, in file-name order.
///
/// Any unreadable or invalid file aborts the load; a service with a broken
/// graph must not start.
pub async fn load_wizard_configs(dir: &Path) -> anyhow::Result<Vec<WizardConfig>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read wizard directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut configs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = parse_wizard_config_json(&content)
            .with_context(|| format!("invalid wizard graph in {}", path.display()))?;
        tracing::debug!(
            provider = %config.provider,
            steps = config.steps.len(),
            path = %path.display(),
            "Loaded wizard graph"
        );
        configs.push(config);
    }

    if configs.is_empty() {
        tracing::warn!("No wizard graphs found in {}", dir.display());
    }

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "provider": "aws",
        "steps": [ { "id": "only", "title": "Only", "selectionType": "single" } ]
    }"#;

    #[tokio::test]
    async fn loads_json_files_in_name_order() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("b.json"), MINIMAL.replace("aws", "gcp"))
            .await
            .unwrap();
        tokio::fs::write(tmp.path().join("a.json"), MINIMAL).await.unwrap();
        tokio::fs::write(tmp.path().join("README.md"), "not a graph")
            .await
            .unwrap();

        let configs = load_wizard_configs(tmp.path()).await.unwrap();
        let providers: Vec<&str> = configs.iter().map(|c| c.provider.as_str()).collect();
        assert_eq!(providers, vec!["aws", "gcp"]);
    }

    #[tokio::test]
    async fn invalid_graph_names_the_file() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("broken.json"), r#"{ "provider": "aws", "steps": [] }"#)
            .await
            .unwrap();

        let err = load_wizard_configs(tmp.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_wizard_configs(&tmp.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn bundled_graphs_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/wizards");
        let configs = load_wizard_configs(&dir).await.unwrap();
        assert!(configs.iter().any(|c| c.provider == "aws"));
    }
}
