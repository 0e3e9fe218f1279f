//! Integration tests for Genesis

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// A genesis command with config, state and projects isolated under
    /// `home` so tests never touch the real user environment.
    fn genesis(home: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("genesis").unwrap();
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"))
            .env("XDG_STATE_HOME", home.path().join(".local/state"))
            .env("GENESIS_PROJECTS_DIR", home.path().join("projects"));
        cmd
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Intelligent Project Scaffolding"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("genesis"));
    }

    #[test]
    fn config_path_shows_document() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.json"));
    }

    #[test]
    fn config_set_get_roundtrip() {
        let home = TempDir::new().unwrap();

        genesis(&home)
            .args(["config", "set", "model", "gpt-4o"])
            .assert()
            .success();

        genesis(&home)
            .args(["config", "get", "model"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gpt-4o"));
    }

    #[test]
    fn config_get_missing_fails() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .args(["config", "get", "absent"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not set"));
    }

    #[test]
    fn config_show_masks_credentials() {
        let home = TempDir::new().unwrap();

        genesis(&home)
            .args(["config", "set", "api_key", "sk-verysecret"])
            .assert()
            .success();

        genesis(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("sk-v****"))
            .stdout(predicate::str::contains("sk-verysecret").not());
    }

    #[test]
    fn build_without_api_key_fails() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .args(["build", "a todo api", "--name", "todo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("API key"));
    }

    #[test]
    fn list_empty_projects() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No projects"));
    }

    #[test]
    fn nuke_missing_project_fails() {
        let home = TempDir::new().unwrap();
        genesis(&home)
            .args(["nuke", "ghost", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Project not found"));
    }

    #[test]
    fn publish_without_token_fails() {
        let home = TempDir::new().unwrap();
        std::fs::create_dir_all(home.path().join("projects/acme")).unwrap();

        genesis(&home)
            .args(["publish", "acme"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("credential"));
    }
}
