//! Site command implementations

use tracing::debug;
use url::Url;

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::core::types::{NewSite, SiteUpdate};
use crate::favicon::{favicon_url, FaviconProbe};

/// Icon used when nothing better is known
const FALLBACK_ICON: &str = "fas fa-globe";

/// Options for `bnav site add`
#[derive(Debug, Default)]
pub struct SiteAddOptions {
    pub category: String,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub tags: Vec<String>,
    pub fetch_icon: bool,
}

/// clap value parser for site URLs
pub fn parse_site_url(value: &str) -> Result<String, String> {
    match Url::parse(value) {
        Ok(url) if url.has_host() => Ok(value.to_string()),
        Ok(_) => Err(format!("'{}' has no host", value)),
        Err(e) => Err(format!("'{}' is not a valid URL: {}", value, e)),
    }
}

async fn pick_icon(ctx: &CliContext, options: &SiteAddOptions) -> String {
    if let Some(ref icon) = options.icon {
        return icon.clone();
    }

    if options.fetch_icon && !ctx.offline {
        let spinner = (!ctx.json).then(|| Output::spinner("Looking for a favicon..."));
        let found = FaviconProbe::new().resolve(&options.url).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        if let Some(icon) = found {
            debug!(icon = %icon, "Using probed favicon");
            return icon;
        }
    }

    let derived = favicon_url(&options.url);
    if derived.is_empty() {
        FALLBACK_ICON.to_string()
    } else {
        derived
    }
}

/// Run `site add`
pub async fn run_site_add(ctx: &CliContext, options: SiteAddOptions) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    let Some(category_name) = manager.category(&options.category).map(|c| c.name.clone()) else {
        return super::report_missing(ctx, &format!("Category not found: {}", options.category));
    };

    let icon = pick_icon(ctx, &options).await;
    let fields = NewSite {
        name: options.name.clone(),
        url: options.url.clone(),
        description: options.description.clone().unwrap_or_default(),
        icon,
        tags: (!options.tags.is_empty()).then(|| options.tags.clone()),
    };

    let Some(id) = manager.add_site(&options.category, fields).await else {
        return super::report_missing(ctx, &format!("Category not found: {}", options.category));
    };

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(&id)));
    }
    super::report_saved(
        ctx,
        &manager,
        &format!("Added {} to {} ({})", options.name, category_name, id),
    );
    Ok(())
}

/// Run `site edit`
pub async fn run_site_edit(
    ctx: &CliContext,
    category_id: &str,
    site_id: &str,
    update: SiteUpdate,
) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    if !manager.edit_site(category_id, site_id, update).await {
        return super::report_missing(
            ctx,
            &format!("Site not found: {} in {}", site_id, category_id),
        );
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(site_id)));
    }
    super::report_saved(ctx, &manager, &format!("Updated site {}", site_id));
    Ok(())
}

/// Run `site rm`
pub async fn run_site_rm(ctx: &CliContext, category_id: &str, site_id: &str) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    if !manager.delete_site(category_id, site_id).await {
        return super::report_missing(
            ctx,
            &format!("Site not found: {} in {}", site_id, category_id),
        );
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(site_id)));
    }
    super::report_saved(ctx, &manager, &format!("Deleted site {}", site_id));
    Ok(())
}

/// Run `site mv`
pub async fn run_site_mv(
    ctx: &CliContext,
    from_id: &str,
    to_id: &str,
    site_id: &str,
) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    if !manager.move_site(from_id, to_id, site_id).await {
        return super::report_missing(
            ctx,
            &format!(
                "Cannot move {}: check that {} contains it and {} exists",
                site_id, from_id, to_id
            ),
        );
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(site_id)));
    }
    super::report_saved(
        ctx,
        &manager,
        &format!("Moved {} from {} to {}", site_id, from_id, to_id),
    );
    Ok(())
}
