//! Stats command implementation

use crate::cli::context::CliContext;
use crate::cli::output::Output;

/// Run the stats command
pub async fn run_stats(ctx: &CliContext) -> anyhow::Result<()> {
    let manager = ctx.open_manager().await;
    let stats = manager.stats();

    if ctx.json {
        return Output::json(&stats);
    }

    Output::header("Navigation Stats");
    Output::kv("Categories", &stats.total_categories.to_string());
    Output::kv("Sites", &stats.total_sites.to_string());
    Output::kv(
        "Categories with sites",
        &stats.categories_with_sites.to_string(),
    );
    Output::kv(
        "Last sync",
        &stats
            .last_sync
            .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string()),
    );
    Output::kv("Unsaved changes", &Output::flag(stats.has_unsaved_changes));
    Output::kv("Online", &Output::flag(stats.is_online));
    Output::kv("Can sync", &Output::flag(stats.can_sync));

    Ok(())
}
