//! Ask command - one-off question to the generation service

use crate::cli::args::AskArgs;
use crate::config::{Store, Workspace};
use crate::error::GenesisResult;
use crate::generate::{generate_with_retry, strip_code_fences, OpenAiService};
use crate::ui::{TaskSpinner, UiContext};

/// Execute the ask command
pub async fn execute(args: AskArgs, workspace: &Workspace) -> GenesisResult<()> {
    let ctx = UiContext::detect();

    let store = Store::load(workspace).await?;
    let service = OpenAiService::from_store(&store)?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Thinking...");

    match generate_with_retry(&service, store.model(), &args.question).await {
        Ok(answer) => {
            spinner.stop("Answer");
            println!("{}", strip_code_fences(&answer).trim());
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Generation failed");
            Err(e)
        }
    }
}
