//! Progress indicators with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    /// Create a new spinner (shows nothing until started)
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Update the spinner message
    pub fn message(&mut self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.start(message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else if self.interactive {
            println!("{} {}", style("✓").green(), message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if self.interactive {
            println!("{} {}", style("✗").red(), message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Progress bar for swarm task execution.
///
/// Counts completed generation tasks with an indicatif bar in interactive
/// mode, or plain text lines in CI.
pub struct SwarmProgress {
    bar: Option<ProgressBar>,
}

impl SwarmProgress {
    /// Create a progress indicator for `total` tasks
    pub fn new(ctx: &UiContext, total: usize) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "  {spinner:.cyan} Generating  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}",
                    )
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .progress_chars("━╸─"),
            );
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            println!("Generating {} files...", total);
            None
        };
        Self { bar }
    }

    /// Record a task starting
    pub fn task_started(&self, path: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(path.to_string());
        }
    }

    /// Record a task finishing
    pub fn task_finished(&self, path: &str, ok: bool) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        } else if ok {
            println!("  {} {}", style("[OK]").green(), path);
        } else {
            println!("  {} {}", style("[FAIL]").red(), path);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}
