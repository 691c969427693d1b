//! Category command implementations

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::core::types::{CategoryUpdate, NewCategory};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// clap value parser for `--color`
pub fn parse_color(value: &str) -> Result<String, String> {
    if COLOR_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{}' is not a hex color (expected #rgb or #rrggbb)",
            value
        ))
    }
}

/// Run `category add`
pub async fn run_category_add(
    ctx: &CliContext,
    name: &str,
    icon: &str,
    color: Option<String>,
) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    let id = manager
        .add_category(NewCategory {
            name: name.to_string(),
            icon: icon.to_string(),
            color,
        })
        .await;

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(&id)));
    }
    super::report_saved(ctx, &manager, &format!("Added category {} ({})", name, id));
    Ok(())
}

/// Run `category edit`
pub async fn run_category_edit(
    ctx: &CliContext,
    category_id: &str,
    update: CategoryUpdate,
) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    if !manager.edit_category(category_id, update).await {
        return super::report_missing(ctx, &format!("Category not found: {}", category_id));
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(category_id)));
    }
    super::report_saved(ctx, &manager, &format!("Updated category {}", category_id));
    Ok(())
}

/// Run `category rm`
pub async fn run_category_rm(ctx: &CliContext, category_id: &str) -> anyhow::Result<()> {
    let mut manager = ctx.open_manager().await;
    let sites = manager
        .category(category_id)
        .map(|c| c.sites.len())
        .unwrap_or_default();
    if !manager.delete_category(category_id).await {
        return super::report_missing(ctx, &format!("Category not found: {}", category_id));
    }

    if ctx.json {
        return Output::json(&super::mutation_json(&manager, Some(category_id)));
    }
    super::report_saved(
        ctx,
        &manager,
        &format!("Deleted category {} and {} site(s)", category_id, sites),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert!(parse_color("#fff").is_ok());
        assert!(parse_color("#667EEA").is_ok());
        assert!(parse_color("667eea").is_err());
        assert!(parse_color("#ffff").is_err());
        assert!(parse_color("#ggg").is_err());
        assert!(parse_color("#667eea ").is_err());
    }
}
