//! Favicon command implementation

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::favicon::{favicon_sources, FaviconProbe};

/// Run the favicon command
pub async fn run_favicon(ctx: &CliContext, url: &str) -> anyhow::Result<()> {
    let sources = favicon_sources(url);
    if sources.is_empty() {
        anyhow::bail!("Cannot derive a favicon from '{}'", url);
    }

    let icon = if ctx.offline {
        None
    } else {
        let spinner = (!ctx.json).then(|| Output::spinner("Probing icon sources..."));
        let found = FaviconProbe::new().probe(&sources).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        found
    };

    if ctx.json {
        return Output::json(&serde_json::json!({ "icon": icon, "sources": sources }));
    }

    match icon {
        Some(icon) => Output::success(&icon),
        None if ctx.offline => Output::info("Offline; candidate sources:"),
        None => Output::warning("No source answered with an image; candidates:"),
    }
    for source in &sources {
        Output::list_item(source);
    }
    Ok(())
}
