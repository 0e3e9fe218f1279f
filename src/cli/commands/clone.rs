//! Clone command - instantiate a cataloged blueprint

use crate::blueprint::CloneCache;
use crate::cli::args::CloneArgs;
use crate::config::Workspace;
use crate::error::{GenesisError, GenesisResult};
use crate::manifest::{Synchronizer, TemplateManifest};
use crate::project::{slugify, ProjectDescriptor};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the clone command
pub async fn execute(args: CloneArgs, workspace: &Workspace) -> GenesisResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Genesis Clone");

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Syncing blueprint catalog...");
    let manifest = Synchronizer::new(workspace).sync().await;
    spinner.stop(&format!("Catalog ready ({} blueprint(s))", manifest.len()));

    let template_id = match args.template {
        Some(id) => id,
        None => pick_template(&ctx, &manifest).await?,
    };

    let entry = manifest
        .get(&template_id)
        .ok_or_else(|| GenesisError::TemplateNotFound(template_id.clone()))?;

    let name = match args.name {
        Some(name) => name,
        None => ui::input(&ctx, "Project name", "acme").await?,
    };

    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(GenesisError::User(
            "Project name must contain at least one alphanumeric character".to_string(),
        ));
    }

    let target = workspace.projects_root().join(&slug);
    if target.exists() {
        return Err(GenesisError::ProjectExists(target));
    }

    let cache = CloneCache::new(workspace);

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Fetching blueprint...");
    let cached = cache.ensure_cached(&template_id, &entry.url).await;
    match &cached {
        Ok(path) => spinner.stop(&format!("Blueprint cached ({})", path.display())),
        Err(_) => spinner.stop_error("Blueprint fetch failed"),
    }
    cached?;

    cache.instantiate(&template_id, &target).await?;

    ProjectDescriptor::from_template(&template_id, &entry.name, &entry.kind)
        .write(&target)
        .await?;

    ui::note(
        &ctx,
        "Project created",
        &format!("Location: {}\nNext: cd {}", target.display(), slug),
    );
    ui::outro_success(&ctx, "Done");

    Ok(())
}

/// List the catalog and prompt for a template ID
async fn pick_template(ctx: &UiContext, manifest: &TemplateManifest) -> GenesisResult<String> {
    if manifest.is_empty() {
        return Err(GenesisError::User(
            "The blueprint catalog is empty; run 'genesis sync' with network access first"
                .to_string(),
        ));
    }

    let items: Vec<(String, String, String)> = manifest
        .iter()
        .map(|(id, entry)| (id.clone(), entry.name.clone(), entry.description.clone()))
        .collect();

    let options: Vec<(String, &str, &str)> = items
        .iter()
        .map(|(id, name, description)| (id.clone(), name.as_str(), description.as_str()))
        .collect();

    ui::select(ctx, "Select a blueprint", &options).await
}
