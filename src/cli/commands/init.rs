//! Init command implementation
//!
//! Writes `config.yaml` pointing the dashboard at a GitHub repository file.

use crate::cli::context::CliContext;
use crate::cli::output::Output;
use crate::core::config::{Config, GitHubConfig};

/// Options for `bnav init`
#[derive(Debug, Default)]
pub struct InitOptions {
    pub owner: String,
    pub repo: String,
    pub branch: Option<String>,
    pub path: Option<String>,
    pub token: Option<String>,
    pub force: bool,
}

/// Run the init command
pub fn run_init(ctx: &CliContext, options: InitOptions) -> anyhow::Result<()> {
    let config_path = ctx.config_path();
    if config_path.exists() && !options.force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite",
            config_path.display()
        );
    }

    let mut github = GitHubConfig::new(&options.owner, &options.repo);
    if let Some(branch) = options.branch {
        github.branch = branch;
    }
    if let Some(path) = options.path {
        github.path = path;
    }
    github.token = options.token.filter(|t| !t.is_empty());

    let has_token = github.resolve_token().is_some();
    let config = Config {
        github: Some(github),
    };
    config.save(&config_path)?;

    if ctx.json {
        return Output::json(&serde_json::json!({
            "ok": true,
            "config": config_path,
            "canWrite": has_token,
        }));
    }

    Output::success(&format!("Wrote {}", config_path.display()));
    if let Some(ref github) = config.github {
        Output::kv("Repository", &format!("{}/{}", github.owner, github.repo));
        Output::kv("Branch", &github.branch);
        Output::kv("Path", &github.path);
    }
    if !has_token {
        Output::warning("No token found; data will be read-only. Set GITHUB_TOKEN or pass --token");
    }

    Ok(())
}
