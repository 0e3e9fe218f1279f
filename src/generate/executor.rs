//! Task execution
//!
//! Normal mode runs tasks strictly in planner order and aborts on the
//! first failure. Swarm mode scatters tasks onto a `JoinSet` with a
//! semaphore bounding in-flight generation calls; each task is retried
//! independently and failures never cancel siblings.

use crate::error::{GenesisError, GenesisResult};
use crate::generate::planner::GenerationTask;
use crate::generate::retry::generate_with_retry;
use crate::generate::sanitize::strip_code_fences;
use crate::generate::service::GenerationService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Concurrent in-flight generation calls in swarm mode
pub const SWARM_CONCURRENCY: usize = 2;

/// Progress notification from the swarm pool
#[derive(Debug, Clone)]
pub enum TaskEvent {
    Started { path: PathBuf },
    Finished { path: PathBuf, ok: bool },
}

/// Result of one swarm task
#[derive(Debug)]
pub struct TaskOutcome {
    /// Task path relative to the project root
    pub path: PathBuf,
    /// Written file on success
    pub result: GenesisResult<PathBuf>,
}

/// Generate one task and write its sanitized output.
///
/// The instruction → response → write sequence completes before the task
/// is reported done; there is no partial-complete state.
async fn run_task(
    service: &dyn GenerationService,
    model: &str,
    task: &GenerationTask,
    dest: &Path,
) -> GenesisResult<PathBuf> {
    let response = generate_with_retry(service, model, &task.instruction).await?;
    let content = strip_code_fences(&response);
    write_output(dest, &task.path, &content).await
}

/// Write generated content under the project root, creating parents
async fn write_output(dest: &Path, relative: &Path, content: &str) -> GenesisResult<PathBuf> {
    let target = dest.join(relative);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| GenesisError::io(format!("creating directory {}", parent.display()), e))?;
    }

    fs::write(&target, content)
        .await
        .map_err(|e| GenesisError::io(format!("writing {}", target.display()), e))?;

    Ok(target)
}

/// Execute tasks one at a time in planner order.
///
/// The first failure aborts the remaining sequence; files already written
/// stay on disk.
pub async fn run_sequential(
    service: &dyn GenerationService,
    model: &str,
    tasks: &[GenerationTask],
    dest: &Path,
) -> GenesisResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(tasks.len());

    for task in tasks {
        debug!("Generating {}", task.path.display());
        written.push(run_task(service, model, task, dest).await?);
    }

    Ok(written)
}

/// Execute all tasks across the bounded worker pool.
///
/// Every task is attempted; per-task outcomes are reported after the pool
/// drains, sorted by path for stable output. Completion order carries no
/// meaning.
pub async fn run_swarm(
    service: Arc<dyn GenerationService>,
    model: String,
    tasks: Vec<GenerationTask>,
    dest: PathBuf,
    events: Option<mpsc::Sender<TaskEvent>>,
) -> Vec<TaskOutcome> {
    let semaphore = Arc::new(Semaphore::new(SWARM_CONCURRENCY));
    let mut pool = JoinSet::new();

    for task in tasks {
        let service = Arc::clone(&service);
        let semaphore = Arc::clone(&semaphore);
        let model = model.clone();
        let dest = dest.clone();
        let events = events.clone();

        pool.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return TaskOutcome {
                        path: task.path.clone(),
                        result: Err(GenesisError::User("worker pool closed".to_string())),
                    }
                }
            };

            if let Some(tx) = &events {
                let _ = tx.send(TaskEvent::Started {
                    path: task.path.clone(),
                })
                .await;
            }

            let result = run_task(service.as_ref(), &model, &task, &dest).await;

            if let Some(tx) = &events {
                let _ = tx.send(TaskEvent::Finished {
                    path: task.path.clone(),
                    ok: result.is_ok(),
                })
                .await;
            }

            TaskOutcome {
                path: task.path,
                result,
            }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = pool.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!("Generation worker panicked: {}", e),
        }
    }

    outcomes.sort_by(|a, b| a.path.cmp(&b.path));
    outcomes
}
