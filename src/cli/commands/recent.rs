//! Recent command - list the last searches

use super::{enter, RECENT_ROUTE};
use crate::app::App;
use crate::cli::args::{FormatArgs, OutputFormat};
use crate::error::{BookshelfError, BookshelfResult};
use crate::guard::Navigation;
use crate::ui::{self, UiContext};
use serde_json::Value;

/// Execute the recent command
pub async fn execute(args: FormatArgs, app: &App) -> BookshelfResult<()> {
    if let Navigation::Redirect(target) = enter(app, RECENT_ROUTE)? {
        return Err(BookshelfError::User(format!(
            "Recent searches unavailable, redirected to {}",
            target
        )));
    }

    // Fetch failures leave the list empty; they are only logged
    app.library.fetch_last_searches().await;
    let entries = app.library.last_searches();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain | OutputFormat::Table if entries.is_empty() => {
            ui::step_info(&UiContext::detect(), "No recent searches");
        }
        OutputFormat::Plain | OutputFormat::Table => {
            for entry in &entries {
                println!("{}", describe(entry));
            }
        }
    }

    Ok(())
}

/// One line per entry: the query text when the entry carries one
fn describe(entry: &Value) -> String {
    match entry {
        Value::String(query) => query.clone(),
        Value::Object(fields) => ["query", "q", "term"]
            .iter()
            .find_map(|k| fields.get(*k).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| entry.to_string()),
        other => other.to_string(),
    }
}
