//! List command implementation

use crate::cli::context::CliContext;
use crate::cli::output::{Output, Table};
use crate::core::types::Category;

/// Run the list command
pub async fn run_list(ctx: &CliContext, category_id: Option<&str>) -> anyhow::Result<()> {
    let manager = ctx.open_manager().await;

    let categories: Vec<&Category> = match category_id {
        Some(id) => match manager.category(id) {
            Some(category) => vec![category],
            None => return super::report_missing(ctx, &format!("Category not found: {}", id)),
        },
        None => manager.categories().iter().collect(),
    };

    if ctx.json {
        return Output::json(&categories);
    }

    if categories.is_empty() {
        Output::info("No categories yet. Add one with `bnav category add`");
        return Ok(());
    }

    for category in &categories {
        print_category(category);
    }

    println!();
    let sites: usize = categories.iter().map(|c| c.sites.len()).sum();
    println!("{} categories, {} sites", categories.len(), sites);

    Ok(())
}

fn print_category(category: &Category) {
    let color = category
        .color
        .as_deref()
        .map(|c| format!(" {}", c))
        .unwrap_or_default();
    Output::header(&format!(
        "{} {}{}",
        Output::category_name(&category.name),
        Output::id(&format!("({})", category.id)),
        color
    ));

    if category.sites.is_empty() {
        println!("  (no sites)");
        return;
    }

    let mut table = Table::new(vec!["ID", "Name", "URL", "Tags"]);
    for site in &category.sites {
        let tags = site.tags.as_deref().map(|t| t.join(", ")).unwrap_or_default();
        table.add_row(vec![&site.id, &site.name, &site.url, &tags]);
    }
    table.print();
}
