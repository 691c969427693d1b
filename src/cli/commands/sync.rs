//! Sync command implementation
//!
//! Pushes the current collection to GitHub regardless of pending changes.

use crate::cli::context::CliContext;
use crate::cli::output::Output;

/// Run the sync command; a failed push is an error
pub async fn run_sync(ctx: &CliContext) -> anyhow::Result<()> {
    if ctx.config.github.is_none() {
        anyhow::bail!("No GitHub repository configured. Run `bnav init --owner <owner> --repo <repo>` first");
    }
    if ctx.offline {
        anyhow::bail!("Cannot sync while offline");
    }

    let mut manager = ctx.open_manager().await;
    if !manager.can_write() {
        anyhow::bail!("No GitHub token available. Set github.token in config.yaml or GITHUB_TOKEN");
    }

    let spinner = (!ctx.json).then(|| Output::spinner("Syncing with GitHub..."));
    let ok = manager.sync_now().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if !ok {
        anyhow::bail!("Sync failed; changes are kept locally");
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, None));
    }
    Output::success("Synced to GitHub");
    Ok(())
}
