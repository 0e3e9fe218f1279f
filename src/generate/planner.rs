//! Generation task planning
//!
//! A build request becomes an ordered list of [`GenerationTask`]s: a fixed
//! role-based plan in swarm mode, or a service-enumerated file list in
//! normal mode. The planner validates paths at the boundary but does not
//! deduplicate them — a plan naming the same path twice clobbers the
//! first write.

use crate::error::{GenesisError, GenesisResult};
use crate::generate::retry::generate_with_retry;
use crate::generate::sanitize::strip_code_fences;
use crate::generate::service::GenerationService;
use std::path::{Component, Path, PathBuf};

/// How a build request is planned and executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Dynamically planned file list, executed sequentially
    Normal,
    /// Fixed role-based plan, executed concurrently
    Swarm,
}

/// One file to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTask {
    /// Destination path relative to the project root
    pub path: PathBuf,
    /// Instruction sent to the generation service
    pub instruction: String,
}

/// The fixed swarm roles: (path, what to write)
const SWARM_ROLES: [(&str, &str); 4] = [
    (
        "main.py",
        "the application entry point implementing the core functionality",
    ),
    (
        "requirements.txt",
        "the dependency manifest listing every package the application needs, one per line",
    ),
    (
        "README.md",
        "the project documentation: an overview, setup steps and usage examples",
    ),
    (
        ".gitignore",
        "ignore rules appropriate for the project's language and tooling",
    ),
];

/// Fixed role-based plan, identical for every request.
///
/// Static by design: the parallel phase gets a bounded task count and no
/// possibility of file-path conflicts.
pub fn plan_swarm(request: &str) -> Vec<GenerationTask> {
    SWARM_ROLES
        .iter()
        .map(|(path, role)| GenerationTask {
            path: PathBuf::from(path),
            instruction: format!(
                "Project request: {request}\n\n\
                 Write {role}. Output only the raw contents of `{path}`, \
                 with no surrounding explanation."
            ),
        })
        .collect()
}

/// Ask the service which files the project needs, one task per path.
///
/// Fails with a planning error — before any file is written — if the
/// response is not a JSON array of safe relative paths.
pub async fn plan_normal(
    service: &dyn GenerationService,
    model: &str,
    request: &str,
) -> GenesisResult<Vec<GenerationTask>> {
    let instruction = format!(
        "List the files a minimal working implementation of this project \
         needs: {request}\n\n\
         Respond with only a JSON array of relative file paths."
    );

    let response = generate_with_retry(service, model, &instruction).await?;
    let cleaned = strip_code_fences(&response);

    let paths: Vec<String> = serde_json::from_str(cleaned.trim()).map_err(|e| {
        GenesisError::Planning(format!("file list was not a JSON array of strings: {e}"))
    })?;

    paths
        .iter()
        .map(|raw| {
            let path = validate_relative_path(raw)?;
            Ok(GenerationTask {
                instruction: format!(
                    "Project request: {request}\n\n\
                     Generate the complete contents of `{raw}` for this \
                     project. Output only the raw file contents."
                ),
                path,
            })
        })
        .collect()
}

/// Turn structured wizard answers into a single build request
pub fn synthesize_request(framework: &str, database: &str, features: &[String]) -> String {
    let mut request = format!("A {framework} application");

    if database != "none" {
        request.push_str(&format!(" backed by {database}"));
    }

    if !features.is_empty() {
        request.push_str(&format!(" with these features: {}", features.join(", ")));
    }

    request
}

/// Accept only non-empty relative paths that stay inside the project root
fn validate_relative_path(raw: &str) -> GenesisResult<PathBuf> {
    let path = Path::new(raw);

    let unsafe_path = raw.is_empty()
        || path.is_absolute()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

    if unsafe_path {
        return Err(GenesisError::Planning(format!(
            "unsafe file path in plan: '{raw}'"
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Replies to every request with a canned response
    struct CannedService(String);

    #[async_trait]
    impl GenerationService for CannedService {
        async fn generate(&self, _model: &str, _instruction: &str) -> GenesisResult<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn swarm_plan_is_fixed_and_ordered() {
        let plan = plan_swarm("a todo api");

        let paths: Vec<_> = plan.iter().map(|t| t.path.to_str().unwrap()).collect();
        assert_eq!(paths, [
            "main.py",
            "requirements.txt",
            "README.md",
            ".gitignore"
        ]);
        assert!(plan.iter().all(|t| t.instruction.contains("a todo api")));
    }

    #[test]
    fn swarm_plan_ignores_request_content() {
        let a = plan_swarm("request one");
        let b = plan_swarm("request two");

        let paths = |plan: &[GenerationTask]| {
            plan.iter().map(|t| t.path.clone()).collect::<Vec<_>>()
        };
        assert_eq!(paths(&a), paths(&b));
    }

    #[tokio::test]
    async fn normal_plan_orders_tasks_by_response() {
        let service = CannedService(r#"["a.py", "b.py"]"#.to_string());

        let plan = plan_normal(&service, "gpt-4", "two files").await.unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].path, PathBuf::from("a.py"));
        assert_eq!(plan[1].path, PathBuf::from("b.py"));
        assert!(plan[0].instruction.contains("a.py"));
        assert!(plan[1].instruction.contains("two files"));
    }

    #[tokio::test]
    async fn normal_plan_accepts_fenced_response() {
        let service = CannedService("```json\n[\"src/app.py\"]\n```".to_string());

        let plan = plan_normal(&service, "gpt-4", "x").await.unwrap();
        assert_eq!(plan[0].path, PathBuf::from("src/app.py"));
    }

    #[tokio::test]
    async fn normal_plan_rejects_invalid_json() {
        let service = CannedService("Sure! The files you need are...".to_string());

        let result = plan_normal(&service, "gpt-4", "x").await;
        assert!(matches!(result, Err(GenesisError::Planning(_))));
    }

    #[tokio::test]
    async fn normal_plan_rejects_non_string_array() {
        let service = CannedService(r#"[{"path": "a.py"}]"#.to_string());

        let result = plan_normal(&service, "gpt-4", "x").await;
        assert!(matches!(result, Err(GenesisError::Planning(_))));
    }

    #[tokio::test]
    async fn normal_plan_rejects_path_traversal() {
        for bad in [r#"["../escape.py"]"#, r#"["/etc/passwd"]"#, r#"[""]"#] {
            let service = CannedService(bad.to_string());
            let result = plan_normal(&service, "gpt-4", "x").await;
            assert!(
                matches!(result, Err(GenesisError::Planning(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn synthesize_full_request() {
        let request = synthesize_request(
            "FastAPI",
            "postgres",
            &["auth".to_string(), "billing".to_string()],
        );
        assert_eq!(
            request,
            "A FastAPI application backed by postgres with these features: auth, billing"
        );
    }

    #[test]
    fn synthesize_minimal_request() {
        assert_eq!(
            synthesize_request("Next.js", "none", &[]),
            "A Next.js application"
        );
    }
}
