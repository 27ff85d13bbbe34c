//! Ingest command: load the catalog CSV, embed all descriptions, and
//! rebuild the vector table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use storefind_core::pipeline;
use storefind_core::provider::EmbeddingProvider;
use storefind_infra::catalog::load_products;

use crate::state::AppState;

/// Run the ingestion pipeline and report the row count.
///
/// # Examples
///
/// ```bash
/// storefind ingest
/// storefind ingest --file data/products.csv --json
/// ```
pub async fn run_ingest(
    state: &AppState,
    file: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(&state.config.catalog_path));

    let records = load_products(&path)
        .with_context(|| format!("failed to load catalog from {}", path.display()))?;

    let inserted = pipeline::run_ingestion(&state.provider, &state.store, &records)
        .await
        .context("ingestion failed")?;

    // JSON is machine output and prints even under --quiet.
    if json {
        let summary = serde_json::json!({
            "inserted": inserted,
            "model": state.provider.model_name(),
            "dimension": state.provider.dimension(),
            "catalog": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} Ingested {} products from {} ({} dims, {})",
        style("✓").green().bold(),
        style(inserted).cyan(),
        style(path.display()).white(),
        state.provider.dimension(),
        state.provider.model_name(),
    );
    println!();

    Ok(())
}
