//! Build orchestration
//!
//! Turns one natural-language request into a set of generation tasks and
//! executes them against the external generation service, sequentially in
//! normal mode or across a small bounded worker pool in swarm mode. Every
//! outbound service call goes through the quota-aware retry controller.

pub mod executor;
pub mod planner;
pub mod retry;
pub mod sanitize;
pub mod service;

pub use executor::{run_sequential, run_swarm, TaskEvent, TaskOutcome, SWARM_CONCURRENCY};
pub use planner::{plan_normal, plan_swarm, synthesize_request, BuildMode, GenerationTask};
pub use retry::generate_with_retry;
pub use sanitize::strip_code_fences;
pub use service::{GenerationService, OpenAiService};
