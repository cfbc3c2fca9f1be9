//! Whoami command - show the current session

use crate::app::App;
use crate::cli::args::{FormatArgs, OutputFormat};
use crate::error::BookshelfResult;
use crate::session::SessionStatus;
use crate::ui::{self, UiContext};

/// Execute the whoami command
pub async fn execute(args: FormatArgs, app: &App, api_url: &str) -> BookshelfResult<()> {
    let session = app.session.session();
    let signed_in = session.status() == SessionStatus::Authenticated;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": session.status(),
                "api": api_url,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => {
            println!("{}", if signed_in { "signed in" } else { "signed out" });
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            ui::key_value_status(
                &ctx,
                "Session",
                if signed_in { "signed in" } else { "signed out" },
                signed_in,
            );
            ui::key_value(&ctx, "API", api_url);
            if !signed_in {
                ui::remark(&ctx, "Run: bookshelf login");
            }
        }
    }

    Ok(())
}
