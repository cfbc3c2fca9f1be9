//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{BookshelfError, BookshelfResult};

/// Prompt for confirmation, returns default if non-interactive or true on auto-yes
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> BookshelfResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    run_prompt("Confirm", move || {
        cliclack::confirm(&message).initial_value(default).interact()
    })
    .await
}

/// Prompt for a line of text. Fails when there is no terminal to ask on.
pub async fn input(ctx: &UiContext, label: &str) -> BookshelfResult<String> {
    require_terminal(ctx, label)?;

    let label = label.to_string();
    run_prompt("Input", move || cliclack::input(&label).interact::<String>()).await
}

/// Prompt for a secret without echoing it
pub async fn password(ctx: &UiContext, label: &str) -> BookshelfResult<String> {
    require_terminal(ctx, label)?;

    let label = label.to_string();
    run_prompt("Password", move || cliclack::password(&label).interact()).await
}

fn require_terminal(ctx: &UiContext, label: &str) -> BookshelfResult<()> {
    if ctx.is_interactive() {
        return Ok(());
    }
    Err(BookshelfError::User(format!(
        "{} is required when not running in a terminal",
        label
    )))
}

/// Run a blocking cliclack prompt off the async runtime
async fn run_prompt<T, F>(kind: &str, prompt: F) -> BookshelfResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| BookshelfError::User(format!("{} task failed: {}", kind, e)))?
        .map_err(|e| BookshelfError::User(format!("{} failed: {}", kind, e)))
}
