//! Search command - query the book catalogue

use super::{enter, print_books, SEARCH_ROUTE};
use crate::app::App;
use crate::cli::args::SearchArgs;
use crate::error::{BookshelfError, BookshelfResult};
use crate::guard::Navigation;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the search command
pub async fn execute(args: SearchArgs, app: &App) -> BookshelfResult<()> {
    if let Navigation::Redirect(target) = enter(app, SEARCH_ROUTE)? {
        return Err(BookshelfError::User(format!(
            "Search unavailable, redirected to {}",
            target
        )));
    }

    let ctx = UiContext::detect();
    let query = args.query.join(" ");

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Searching for \"{}\"...", query));
    app.library.search_books(&query).await;
    spinner.clear();

    let state = app.library.snapshot();
    if let Some(message) = state.request.error_message {
        return Err(BookshelfError::User(message));
    }

    if state.search_results.is_empty() {
        ui::step_info(&ctx, "No books found");
        return Ok(());
    }

    print_books(&state.search_results, args.output.format)
}
