//! Export command implementation

use std::path::Path;

use crate::cli::context::CliContext;
use crate::cli::output::Output;

/// Run the export command
pub async fn run_export(ctx: &CliContext, dir: &Path) -> anyhow::Result<()> {
    let manager = ctx.open_manager().await;
    let Some(path) = manager.export_to(dir) else {
        anyhow::bail!("Export to {} failed", dir.display());
    };

    if ctx.json {
        return Output::json(&serde_json::json!({ "ok": true, "path": path }));
    }
    Output::success(&format!("Exported to {}", path.display()));
    Ok(())
}
