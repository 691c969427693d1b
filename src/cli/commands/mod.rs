//! CLI command implementations
//!
//! Each command is implemented in its own module.

pub mod category;
pub mod export;
pub mod favicon;
pub mod import;
pub mod init;
pub mod list;
pub mod reset;
pub mod search;
pub mod site;
pub mod stats;
pub mod sync;

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::core::manager::SiteManager;

/// Tell the user where a change ended up after a mutation
pub(crate) fn report_saved(ctx: &CliContext, manager: &SiteManager, what: &str) {
    if ctx.json {
        return;
    }
    Output::success(what);
    if !manager.can_write() {
        Output::info("Saved locally");
    } else if manager.is_dirty() {
        Output::warning("Saved locally but not pushed to GitHub; run `bnav sync` when online");
    } else {
        Output::info("Synced to GitHub");
    }
}

/// Print a lookup miss
pub(crate) fn report_missing(ctx: &CliContext, what: &str) -> anyhow::Result<()> {
    if ctx.json {
        return Output::json(&serde_json::json!({ "ok": false, "error": what }));
    }
    Output::warning(what);
    Ok(())
}

/// JSON body for commands that change data
pub(crate) fn mutation_json(manager: &SiteManager, id: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "ok": true,
        "synced": manager.can_write() && !manager.is_dirty(),
    });
    if let Some(id) = id {
        body["id"] = serde_json::Value::from(id);
    }
    body
}
