//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{GenesisError, GenesisResult};

/// Prompt for confirmation, returns default if non-interactive or auto-yes
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> GenesisResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| GenesisError::User(format!("Prompt task failed: {e}")))?;

    result.map_err(|e| GenesisError::User(format!("Prompt failed: {e}")))
}

/// Prompt for a line of text.
///
/// Non-interactive sessions cannot answer; callers must accept the value
/// as an argument instead.
pub async fn input(ctx: &UiContext, message: &str, placeholder: &str) -> GenesisResult<String> {
    if !ctx.is_interactive() {
        return Err(GenesisError::User(format!(
            "'{message}' needs an interactive terminal; pass the value as an argument"
        )));
    }

    let message = message.to_string();
    let placeholder = placeholder.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .placeholder(&placeholder)
            .interact::<String>()
    })
    .await
    .map_err(|e| GenesisError::User(format!("Prompt task failed: {e}")))?;

    result.map_err(|e| GenesisError::User(format!("Prompt failed: {e}")))
}

/// Prompt for selection from a list of options
/// Returns the selected value or the first option if non-interactive
pub async fn select<T: Clone + Send + Eq + 'static>(
    ctx: &UiContext,
    message: &str,
    options: &[(T, &str, &str)], // (value, label, hint)
) -> GenesisResult<T> {
    if !ctx.is_interactive() || ctx.auto_yes() {
        return Ok(options[0].0.clone());
    }

    let message = message.to_string();
    let items: Vec<(T, String, String)> = options
        .iter()
        .map(|(v, l, h)| (v.clone(), l.to_string(), h.to_string()))
        .collect();

    let result: Result<Result<T, std::io::Error>, _> = tokio::task::spawn_blocking(move || {
        let mut select = cliclack::select(&message);
        for (value, label, hint) in items {
            select = select.item(value, label, hint);
        }
        select.interact()
    })
    .await;

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(GenesisError::User(format!("Select failed: {e}"))),
        Err(e) => Err(GenesisError::User(format!("Select task failed: {e}"))),
    }
}
