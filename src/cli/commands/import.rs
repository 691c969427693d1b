//! Import command implementation

use anyhow::Context;
use std::path::Path;

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::core::import::parse_collection;

/// Run the import command; a rejected file is an error
pub async fn run_import(ctx: &CliContext, file: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if let Err(e) = parse_collection(&json) {
        anyhow::bail!("Invalid import file {}: {}", file.display(), e);
    }

    let mut manager = ctx.open_manager().await;
    if !manager.import_json(&json).await {
        anyhow::bail!("Import of {} was rejected", file.display());
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, None));
    }
    let stats = manager.stats();
    super::report_saved(
        ctx,
        &manager,
        &format!(
            "Imported {} categories, {} sites",
            stats.total_categories, stats.total_sites
        ),
    );
    Ok(())
}
