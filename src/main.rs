//! bnav CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use birdnav::cli::commands;
use birdnav::cli::commands::category::parse_color;
use birdnav::cli::commands::init::InitOptions;
use birdnav::cli::commands::site::{parse_site_url, SiteAddOptions};
use birdnav::cli::CliContext;
use birdnav::core::config::default_data_dir;
use birdnav::core::types::{CategoryUpdate, SiteUpdate};
use birdnav::telemetry::{init_telemetry, TelemetryConfig};

#[derive(Parser)]
#[command(name = "bnav")]
#[command(author, version, about = "Personal navigation dashboard synced to GitHub", long_about = None)]
struct Cli {
    /// Data directory (default: ~/.birdnav)
    #[arg(long, global = true, env = "BIRDNAV_HOME")]
    data_dir: Option<PathBuf>,

    /// Do not contact GitHub; work from the local backup
    #[arg(long, global = true)]
    offline: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging and a metrics report on exit
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Point the dashboard at a GitHub repository file
    Init {
        /// Repository owner
        #[arg(long)]
        owner: String,
        /// Repository name
        #[arg(long)]
        repo: String,
        /// Branch holding the data file (default: main)
        #[arg(long)]
        branch: Option<String>,
        /// Path of the data file (default: data/navigation.json)
        #[arg(long)]
        path: Option<String>,
        /// Personal access token stored in config.yaml
        #[arg(long)]
        token: Option<String>,
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
    /// List categories and sites
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Find sites by name, description, URL or tag
    Search {
        /// Case-insensitive search text
        query: String,
    },
    /// Show collection and sync statistics
    Stats,
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),
    /// Manage sites
    #[command(subcommand)]
    Site(SiteCommands),
    /// Replace everything with the default data
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write bird-nav-backup.json
    Export {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Replace everything with the contents of an export file
    Import {
        /// File produced by `bnav export`
        file: PathBuf,
    },
    /// Push the current data to GitHub now
    Sync,
    /// Find a favicon for a URL
    Favicon {
        /// Site URL
        url: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category
    Add {
        /// Display name
        name: String,
        /// Icon reference
        #[arg(long, default_value = "fas fa-folder")]
        icon: String,
        /// Accent color (#rgb or #rrggbb)
        #[arg(long, value_parser = parse_color)]
        color: Option<String>,
    },
    /// Edit a category
    Edit {
        /// Category ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Accent color (#rgb or #rrggbb)
        #[arg(long, value_parser = parse_color, conflicts_with = "no_color")]
        color: Option<String>,
        /// Remove the accent color
        #[arg(long)]
        no_color: bool,
    },
    /// Delete a category and its sites
    Rm {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SiteCommands {
    /// Add a site to a category
    Add {
        /// Category ID
        category: String,
        /// Display name
        name: String,
        /// Site URL
        #[arg(value_parser = parse_site_url)]
        url: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Icon reference (default: derived favicon)
        #[arg(long)]
        icon: Option<String>,
        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Probe favicon services for a working icon
        #[arg(long, conflicts_with = "icon")]
        fetch_icon: bool,
    },
    /// Edit a site
    Edit {
        /// Category ID
        category: String,
        /// Site ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_site_url)]
        url: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Replace tags (repeatable)
        #[arg(short, long = "tag", conflicts_with = "no_tags")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long)]
        no_tags: bool,
    },
    /// Delete a site
    Rm {
        /// Category ID
        category: String,
        /// Site ID
        id: String,
    },
    /// Move a site to the end of another category
    Mv {
        /// Source category ID
        from: String,
        /// Target category ID
        to: String,
        /// Site ID
        id: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::List { .. } => "list",
            Commands::Search { .. } => "search",
            Commands::Stats => "stats",
            Commands::Category(_) => "category",
            Commands::Site(_) => "site",
            Commands::Reset { .. } => "reset",
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Sync => "sync",
            Commands::Favicon { .. } => "favicon",
            Commands::Completions { .. } => "completions",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_telemetry(&TelemetryConfig::cli(cli.verbose))?;

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let ctx = CliContext::load(data_dir, cli.json, cli.offline, cli.verbose)?;

    #[cfg(feature = "telemetry")]
    let started = std::time::Instant::now();
    let name = cli.command.name();

    let result = run(&ctx, cli.command).await;

    #[cfg(feature = "telemetry")]
    {
        birdnav::telemetry::GLOBAL_METRICS.record_operation(name, started.elapsed());
        if ctx.verbose {
            let snapshot = birdnav::telemetry::GLOBAL_METRICS.snapshot();
            eprint!("{}", snapshot.format_report());
        }
    }

    if let Err(ref e) = result {
        tracing::debug!(command = name, error = %e, "Command failed");
    }
    result
}

async fn run(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init {
            owner,
            repo,
            branch,
            path,
            token,
            force,
        } => commands::init::run_init(
            ctx,
            InitOptions {
                owner,
                repo,
                branch,
                path,
                token,
                force,
            },
        ),
        Commands::List { category } => commands::list::run_list(ctx, category.as_deref()).await,
        Commands::Search { query } => commands::search::run_search(ctx, &query).await,
        Commands::Stats => commands::stats::run_stats(ctx).await,
        Commands::Category(action) => match action {
            CategoryCommands::Add { name, icon, color } => {
                commands::category::run_category_add(ctx, &name, &icon, color).await
            }
            CategoryCommands::Edit {
                id,
                name,
                icon,
                color,
                no_color,
            } => {
                let update = CategoryUpdate {
                    name,
                    icon,
                    color: if no_color { Some(None) } else { color.map(Some) },
                };
                commands::category::run_category_edit(ctx, &id, update).await
            }
            CategoryCommands::Rm { id } => commands::category::run_category_rm(ctx, &id).await,
        },
        Commands::Site(action) => match action {
            SiteCommands::Add {
                category,
                name,
                url,
                description,
                icon,
                tags,
                fetch_icon,
            } => {
                commands::site::run_site_add(
                    ctx,
                    SiteAddOptions {
                        category,
                        name,
                        url,
                        description,
                        icon,
                        tags,
                        fetch_icon,
                    },
                )
                .await
            }
            SiteCommands::Edit {
                category,
                id,
                name,
                url,
                description,
                icon,
                tags,
                no_tags,
            } => {
                let tags = if no_tags {
                    Some(None)
                } else if tags.is_empty() {
                    None
                } else {
                    Some(Some(tags))
                };
                let update = SiteUpdate {
                    name,
                    url,
                    description,
                    icon,
                    tags,
                };
                commands::site::run_site_edit(ctx, &category, &id, update).await
            }
            SiteCommands::Rm { category, id } => {
                commands::site::run_site_rm(ctx, &category, &id).await
            }
            SiteCommands::Mv { from, to, id } => {
                commands::site::run_site_mv(ctx, &from, &to, &id).await
            }
        },
        Commands::Reset { yes } => commands::reset::run_reset(ctx, yes).await,
        Commands::Export { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            commands::export::run_export(ctx, &dir).await
        }
        Commands::Import { file } => commands::import::run_import(ctx, &file).await,
        Commands::Sync => commands::sync::run_sync(ctx).await,
        Commands::Favicon { url } => commands::favicon::run_favicon(ctx, &url).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "bnav", &mut std::io::stdout());
            Ok(())
        }
    }
}
