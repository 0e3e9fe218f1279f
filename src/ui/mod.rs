//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive output and prompts with automatic
//! fallback to plain text in CI/non-interactive environments.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, note, outro_success, outro_warn, step_error_detail, step_ok, step_ok_detail, step_warn,
    step_warn_hint,
};
pub use progress::{SwarmProgress, TaskSpinner};
pub use prompts::{confirm, input, select};
pub use theme::{init_theme, GenesisTheme};
