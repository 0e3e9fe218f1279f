//! Wizard command - guided project generation
//!
//! A thin front-end over the build flow: structured answers become one
//! synthesized request string, then normal-mode planning takes over.

use crate::cli::args::BuildArgs;
use crate::cli::commands::build;
use crate::config::Workspace;
use crate::error::GenesisResult;
use crate::generate::synthesize_request;
use crate::ui::{self, UiContext};

const FRAMEWORKS: [(&str, &str, &str); 4] = [
    ("FastAPI", "FastAPI", "Python REST APIs"),
    ("Next.js", "Next.js", "React web apps"),
    ("Flask", "Flask", "Lightweight Python web"),
    ("command-line", "CLI tool", "Terminal utilities"),
];

const DATABASES: [(&str, &str, &str); 4] = [
    ("none", "None", "No persistence"),
    ("postgres", "PostgreSQL", "Relational"),
    ("sqlite", "SQLite", "Embedded relational"),
    ("redis", "Redis", "Key/value cache"),
];

/// Execute the wizard command
pub async fn execute(workspace: &Workspace) -> GenesisResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Genesis Wizard");

    let framework = ui::select(&ctx, "Framework", &FRAMEWORKS).await?;
    let database = ui::select(&ctx, "Database", &DATABASES).await?;
    let features_raw = ui::input(
        &ctx,
        "Features (comma-separated, or 'none')",
        "auth, billing",
    )
    .await?;
    let name = ui::input(&ctx, "Project name", "my_project").await?;

    let features = parse_features(&features_raw);
    let request = synthesize_request(framework, database, &features);

    ui::note(&ctx, "Build request", &request);

    build::run(
        BuildArgs {
            request,
            name: Some(name),
            swarm: false,
            publish: false,
        },
        workspace,
        &ctx,
    )
    .await
}

fn parse_features(raw: &str) -> Vec<String> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return vec![];
    }

    raw.split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_features_list() {
        assert_eq!(parse_features("auth, billing , search"), [
            "auth", "billing", "search"
        ]);
    }

    #[test]
    fn parse_features_none() {
        assert!(parse_features("none").is_empty());
        assert!(parse_features("NONE").is_empty());
        assert!(parse_features("  ").is_empty());
    }
}
