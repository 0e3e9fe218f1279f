//! Sync command - refresh the blueprint catalog

use crate::config::Workspace;
use crate::error::GenesisResult;
use crate::manifest::{Synchronizer, TemplateManifest};
use crate::ui::{TaskSpinner, UiContext};

/// Execute the sync command
pub async fn execute(workspace: &Workspace) -> GenesisResult<()> {
    let ctx = UiContext::detect();

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Syncing blueprint catalog...");
    let manifest = Synchronizer::new(workspace).sync().await;
    spinner.stop(&format!("Synced {} blueprint(s)", manifest.len()));

    if manifest.is_empty() {
        println!("No blueprints available. Check your network and try again.");
        return Ok(());
    }

    print_catalog_table(&manifest);
    Ok(())
}

fn print_catalog_table(manifest: &TemplateManifest) {
    println!();
    println!("{:<24} {:<28} {:<8}", "ID", "NAME", "TYPE");
    println!("{}", "-".repeat(62));

    for (id, entry) in manifest {
        println!("{:<24} {:<28} {:<8}", id, entry.name, entry.kind);
    }

    println!();
    println!("Total: {} blueprint(s)", manifest.len());
}
