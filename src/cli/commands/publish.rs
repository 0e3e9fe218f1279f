//! Publish command - push an existing project to a remote repository

use crate::cli::args::PublishArgs;
use crate::config::store::KEY_GITHUB_TOKEN;
use crate::config::{Store, Workspace};
use crate::error::{GenesisError, GenesisResult};
use crate::publish::Publisher;
use crate::ui::{TaskSpinner, UiContext};

/// Execute the publish command
pub async fn execute(args: PublishArgs, workspace: &Workspace) -> GenesisResult<()> {
    let target = workspace.projects_root().join(&args.name);

    if !target.is_dir() {
        return Err(GenesisError::ProjectNotFound(args.name));
    }

    let store = Store::load(workspace).await?;
    let token = store.get(KEY_GITHUB_TOKEN).ok_or(GenesisError::PublishAuth)?;

    let repo = args.repo.as_deref().unwrap_or(&args.name);

    let ctx = UiContext::detect();
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Publishing {} as {}...", args.name, repo));

    match Publisher::new(token).publish(&target, repo).await {
        Ok(url) => {
            spinner.stop(&format!("Published to {url}"));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Publish failed");
            Err(e)
        }
    }
}
