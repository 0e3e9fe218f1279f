//! List command - projects under the projects root

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Workspace;
use crate::error::GenesisResult;
use crate::project::{list_projects, ProjectInfo, ProjectSource};

/// Execute the list command
pub async fn execute(args: ListArgs, workspace: &Workspace) -> GenesisResult<()> {
    let projects = list_projects(workspace.projects_root()).await?;

    if projects.is_empty() {
        println!(
            "No projects found in {}",
            workspace.projects_root().display()
        );
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&projects),
        OutputFormat::Json => print_json(&projects)?,
        OutputFormat::Plain => {
            for project in &projects {
                println!("{}", project.name);
            }
        }
    }

    Ok(())
}

fn origin_label(project: &ProjectInfo) -> String {
    match project.descriptor.as_ref().map(|d| &d.origin) {
        Some(ProjectSource::Template { id, .. }) => id.clone(),
        Some(ProjectSource::Prompt { .. }) => "prompt".to_string(),
        None => "?".to_string(),
    }
}

fn print_table(projects: &[ProjectInfo]) {
    println!("{:<24} {:<12} {:<24} {:<16}", "NAME", "TYPE", "SOURCE", "CREATED");
    println!("{}", "-".repeat(78));

    for project in projects {
        let kind = project
            .descriptor
            .as_ref()
            .map(|d| d.kind.clone())
            .unwrap_or_else(|| "?".to_string());
        let created = project
            .descriptor
            .as_ref()
            .map(|d| d.created_at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "{:<24} {:<12} {:<24} {:<16}",
            project.name,
            kind,
            origin_label(project),
            created
        );
    }

    println!();
    println!("Total: {} project(s)", projects.len());
}

fn print_json(projects: &[ProjectInfo]) -> GenesisResult<()> {
    let entries: Vec<serde_json::Value> = projects
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": &p.name,
                "descriptor": &p.descriptor,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
