//! Search command: embed a query and print the top-k ranked products.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use storefind_core::pipeline;

use crate::state::AppState;

/// Run the search pipeline and render the ranked results.
///
/// # Examples
///
/// ```bash
/// storefind search "warm hat for winter"
/// storefind search "running shoes" -k 3 --json
/// ```
pub async fn run_search(
    state: &AppState,
    query: &str,
    top_k: usize,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let results = pipeline::run_search(&state.provider, &state.store, query, top_k)
        .await
        .context("search failed")?;

    // JSON is machine output and prints even under --quiet.
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    if results.is_empty() {
        println!();
        println!(
            "  {} No matching products for '{}'.",
            style("i").blue().bold(),
            style(query).cyan(),
        );
        println!();
        return Ok(());
    }

    println!();
    println!("  Results for '{}':", style(query).cyan());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Product").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Similarity").fg(Color::White),
    ]);

    for result in &results {
        let description = truncate_description(&result.description, 60);

        table.add_row(vec![
            Cell::new(&result.product_name).fg(Color::Cyan),
            Cell::new(description).fg(Color::White),
            Cell::new(format!("{:.4}", result.similarity)).fg(Color::Yellow),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Truncate to at most `max` characters for table display.
///
/// Counts characters rather than bytes so multibyte text is never cut
/// inside a code point.
fn truncate_description(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
