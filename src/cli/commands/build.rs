//! Build command - generate a project from a natural-language request

use crate::cli::args::BuildArgs;
use crate::config::store::KEY_GITHUB_TOKEN;
use crate::config::{Store, Workspace};
use crate::error::{GenesisError, GenesisResult};
use crate::generate::{
    plan_normal, plan_swarm, run_sequential, run_swarm, BuildMode, GenerationService,
    GenerationTask, OpenAiService, TaskEvent,
};
use crate::project::{slugify, ProjectDescriptor};
use crate::publish::Publisher;
use crate::ui::{self, SwarmProgress, TaskSpinner, UiContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::debug;

/// Execute the build command
pub async fn execute(args: BuildArgs, workspace: &Workspace) -> GenesisResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Genesis Build");
    run(args, workspace, &ctx).await
}

/// Build flow without the intro banner (shared with the wizard)
pub async fn run(args: BuildArgs, workspace: &Workspace, ctx: &UiContext) -> GenesisResult<()> {
    let store = Store::load(workspace).await?;
    let service: Arc<dyn GenerationService> = Arc::new(OpenAiService::from_store(&store)?);
    let model = store.model().to_string();

    let name = match args.name {
        Some(name) => name,
        None => ui::input(ctx, "Project name", "my_project").await?,
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

    let mode = if args.swarm {
        BuildMode::Swarm
    } else {
        BuildMode::Normal
    };

    // Plan before creating anything on disk: a planning failure must
    // leave no trace of the project.
    let tasks = match mode {
        BuildMode::Swarm => plan_swarm(&args.request),
        BuildMode::Normal => {
            let mut spinner = TaskSpinner::new(ctx);
            spinner.start("Planning files...");
            match plan_normal(service.as_ref(), &model, &args.request).await {
                Ok(tasks) => {
                    spinner.stop(&format!("Planned {} file(s)", tasks.len()));
                    tasks
                }
                Err(e) => {
                    spinner.stop_error("Planning failed");
                    return Err(e);
                }
            }
        }
    };

    if tasks.is_empty() {
        return Err(GenesisError::Planning(
            "service returned an empty file list".to_string(),
        ));
    }

    fs::create_dir_all(&target)
        .await
        .map_err(|e| GenesisError::io(format!("creating project {}", target.display()), e))?;

    // Descriptor first, so even partially generated work is classified
    ProjectDescriptor::from_prompt(&args.request)
        .write(&target)
        .await?;

    let failed = match mode {
        BuildMode::Normal => generate_sequential(ctx, service.as_ref(), &model, &tasks, &target).await?,
        BuildMode::Swarm => generate_swarm(ctx, service, model, tasks, target.clone()).await?,
    };

    if args.publish {
        publish_project(ctx, &store, &target, &slug).await;
    }

    ui::note(ctx, "Project location", &target.display().to_string());

    if failed.is_empty() {
        ui::outro_success(ctx, "Project generated");
    } else {
        ui::outro_warn(ctx, &format!("Generated with {} failed file(s)", failed.len()));
    }

    Ok(())
}

/// Normal mode: strict planner order, abort on first failure
async fn generate_sequential(
    ctx: &UiContext,
    service: &dyn GenerationService,
    model: &str,
    tasks: &[GenerationTask],
    target: &Path,
) -> GenesisResult<Vec<PathBuf>> {
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Generating {} file(s)...", tasks.len()));

    match run_sequential(service, model, tasks, target).await {
        Ok(written) => {
            spinner.stop(&format!("Generated {} file(s)", written.len()));
            Ok(vec![])
        }
        Err(e) => {
            spinner.stop_error("Generation failed");
            Err(e)
        }
    }
}

/// Swarm mode: bounded pool, failures isolated and reported per task
async fn generate_swarm(
    ctx: &UiContext,
    service: Arc<dyn GenerationService>,
    model: String,
    tasks: Vec<GenerationTask>,
    target: PathBuf,
) -> GenesisResult<Vec<PathBuf>> {
    let total = tasks.len();
    let progress = SwarmProgress::new(ctx, total);

    let (tx, mut rx) = mpsc::channel(16);
    let pool = tokio::spawn(run_swarm(service, model, tasks, target, Some(tx)));

    while let Some(event) = rx.recv().await {
        match event {
            TaskEvent::Started { path } => {
                progress.task_started(&path.display().to_string());
            }
            TaskEvent::Finished { path, ok } => {
                progress.task_finished(&path.display().to_string(), ok);
            }
        }
    }
    progress.finish();

    let outcomes = pool
        .await
        .map_err(|e| GenesisError::User(format!("swarm pool failed: {e}")))?;

    let mut failed = vec![];
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => debug!("Wrote {}", path.display()),
            Err(e) => {
                ui::step_error_detail(ctx, &outcome.path.display().to_string(), &e.to_string());
                failed.push(outcome.path.clone());
            }
        }
    }

    if failed.len() == total {
        return Err(GenesisError::Service(
            "all generation tasks failed".to_string(),
        ));
    }

    Ok(failed)
}

/// Hand off to the publish collaborator; never fatal to the build
async fn publish_project(ctx: &UiContext, store: &Store, target: &Path, slug: &str) {
    let Some(token) = store.get(KEY_GITHUB_TOKEN) else {
        ui::step_warn_hint(ctx, "Publish skipped", "no github_token configured");
        return;
    };

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Publishing to remote repository...");

    match Publisher::new(token).publish(target, slug).await {
        Ok(url) => spinner.stop(&format!("Published to {url}")),
        Err(e) => spinner.stop_error(&format!("Publish failed: {e}")),
    }
}
