//! Config command - show or edit the key/value store

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Store, Workspace};
use crate::error::{GenesisError, GenesisResult};
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, workspace: &Workspace) -> GenesisResult<()> {
    let mut store = Store::load(workspace).await?;

    match args.action {
        ConfigAction::Show => {
            let mut empty = true;
            for (key, value) in store.entries() {
                println!("{} = {}", key, mask_secret(key, value));
                empty = false;
            }
            if empty {
                println!("(no configuration set)");
            }
            Ok(())
        }

        ConfigAction::Path => {
            println!("{}", store.path().display());
            Ok(())
        }

        ConfigAction::Get { key } => match store.get(&key) {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(GenesisError::User(format!("'{key}' is not set"))),
        },

        ConfigAction::Set { key, value } => {
            store.set(&key, value);
            store.save().await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {key}"));
            Ok(())
        }

        ConfigAction::Unset { key } => {
            if !store.unset(&key) {
                return Err(GenesisError::User(format!("'{key}' is not set")));
            }
            store.save().await?;
            ui::step_ok(&UiContext::detect(), &format!("Removed {key}"));
            Ok(())
        }
    }
}

/// Keep credentials out of terminal scrollback
fn mask_secret(key: &str, value: &str) -> String {
    if !key.ends_with("_key") && !key.ends_with("_token") {
        return value.to_string();
    }

    if value.chars().count() <= 4 {
        return "****".to_string();
    }

    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}****")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn mask_hides_credentials() {
        assert_eq!(mask_secret("api_key", "sk-12345678"), "sk-1****");
        assert_eq!(mask_secret("github_token", "ghp"), "****");
        assert_eq!(mask_secret("model", "gpt-4"), "gpt-4");
    }

    #[tokio::test]
    async fn set_then_get() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::with_root(temp.path());

        let args = ConfigArgs {
            action: ConfigAction::Set {
                key: "model".to_string(),
                value: "gpt-4o".to_string(),
            },
        };
        execute(args, &ws).await.unwrap();

        let store = Store::load(&ws).await.unwrap();
        assert_eq!(store.get("model"), Some("gpt-4o"));
    }

    #[tokio::test]
    async fn get_missing_key_errors() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::with_root(temp.path());

        let args = ConfigArgs {
            action: ConfigAction::Get {
                key: "absent".to_string(),
            },
        };
        assert!(execute(args, &ws).await.is_err());
    }

    #[tokio::test]
    async fn unset_missing_key_errors() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::with_root(temp.path());

        let args = ConfigArgs {
            action: ConfigAction::Unset {
                key: "absent".to_string(),
            },
        };
        assert!(execute(args, &ws).await.is_err());
    }
}
