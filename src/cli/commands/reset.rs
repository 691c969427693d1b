//! Reset command implementation

use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

use crate::cli::context::CliContext;
use crate::cli::output::Output;

/// Run the reset command
pub async fn run_reset(ctx: &CliContext, yes: bool) -> anyhow::Result<()> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Refusing to reset without confirmation; pass --yes");
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Replace all categories and sites with the default data?")
            .default(false)
            .interact()?;
        if !confirmed {
            Output::info("Reset cancelled");
            return Ok(());
        }
    }

    let mut manager = ctx.open_manager().await;
    manager.reset_to_default().await;

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, None));
    }
    let stats = manager.stats();
    super::report_saved(
        ctx,
        &manager,
        &format!(
            "Reset to default data ({} categories, {} sites)",
            stats.total_categories, stats.total_sites
        ),
    );
    Ok(())
}
