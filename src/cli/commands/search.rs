//! Search command implementation

use crate::cli::context::CliContext;
use crate::cli::output::{Output, Table};

/// Run the search command
pub async fn run_search(ctx: &CliContext, query: &str) -> anyhow::Result<()> {
    let manager = ctx.open_manager().await;
    let results = manager.search(query);

    if ctx.json {
        return Output::json(&results);
    }

    if results.is_empty() {
        Output::info(&format!("No sites match '{}'", query));
        return Ok(());
    }

    let mut table = Table::new(vec!["Site", "Category", "URL"]);
    for result in &results {
        table.add_row(vec![
            &Output::site_name(&result.site.name),
            &Output::category_name(&result.category.name),
            &result.site.url,
        ]);
    }
    table.print();

    println!();
    println!("{} match(es)", results.len());
    Ok(())
}
