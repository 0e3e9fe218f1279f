//! Nuke command - delete a project

use crate::cli::args::NukeArgs;
use crate::config::Workspace;
use crate::error::{GenesisError, GenesisResult};
use crate::ui::{self, UiContext};
use tokio::fs;

/// Execute the nuke command
pub async fn execute(args: NukeArgs, workspace: &Workspace) -> GenesisResult<()> {
    let target = workspace.projects_root().join(&args.name);

    if !target.is_dir() {
        return Err(GenesisError::ProjectNotFound(args.name));
    }

    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let confirmed = ui::confirm(
        &ctx,
        &format!("Delete project '{}' permanently?", args.name),
        false,
    )
    .await?;

    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    fs::remove_dir_all(&target)
        .await
        .map_err(|e| GenesisError::io(format!("deleting {}", target.display()), e))?;

    ui::step_ok(&ctx, &format!("Deleted {}", args.name));
    Ok(())
}
