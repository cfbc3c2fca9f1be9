//! Library command - list and edit your personal library

use super::{enter, print_books, LIBRARY_ROUTE};
use crate::app::App;
use crate::cli::args::{BookInput, FormatArgs, LibraryAction, LibraryArgs};
use crate::error::{BookshelfError, BookshelfResult};
use crate::guard::Navigation;
use crate::library::Book;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the library command
pub async fn execute(args: LibraryArgs, app: &App) -> BookshelfResult<()> {
    if let Navigation::Redirect(target) = enter(app, LIBRARY_ROUTE)? {
        return Err(BookshelfError::User(format!(
            "Library unavailable, redirected to {}",
            target
        )));
    }

    let ctx = UiContext::detect();

    match args.action {
        LibraryAction::List(output) => list(&ctx, app, output).await,
        LibraryAction::Add(input) => add(&ctx, app, input).await,
        LibraryAction::Update { id, book } => update(&ctx, app, &id, book).await,
        LibraryAction::Remove { id, yes } => remove(ctx.with_auto_yes(yes), app, &id).await,
    }
}

async fn list(ctx: &UiContext, app: &App, output: FormatArgs) -> BookshelfResult<()> {
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Loading library...");
    app.library.fetch_my_library().await;
    spinner.clear();

    let state = app.library.snapshot();
    if let Some(message) = state.request.error_message {
        return Err(BookshelfError::User(message));
    }

    if state.my_library.is_empty() {
        ui::step_info(ctx, "Your library is empty");
        ui::remark(ctx, "Add a book with: bookshelf library add --title <TITLE>");
        return Ok(());
    }

    print_books(&state.my_library, output.format)
}

async fn add(ctx: &UiContext, app: &App, input: BookInput) -> BookshelfResult<()> {
    let book = parse_book(input)?;

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Saving book...");
    if let Err(e) = app.library.save_book(&book).await {
        spinner.stop_error(&failure_message(app));
        return Err(e);
    }
    spinner.stop(&format!("Saved \"{}\"", book.title().unwrap_or("book")));

    Ok(())
}

async fn update(ctx: &UiContext, app: &App, id: &str, input: BookInput) -> BookshelfResult<()> {
    let book = parse_book(input)?;

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Updating {}...", id));
    if let Err(e) = app.library.update_book(id, &book).await {
        spinner.stop_error(&failure_message(app));
        return Err(e);
    }
    spinner.stop(&format!("Updated {}", id));

    Ok(())
}

async fn remove(ctx: UiContext, app: &App, id: &str) -> BookshelfResult<()> {
    if !ui::confirm(&ctx, &format!("Remove {} from your library?", id), false).await? {
        ui::step_info(&ctx, "Nothing removed");
        ui::remark(&ctx, "Pass --yes to remove without a prompt");
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Removing {}...", id));
    if let Err(e) = app.library.delete_book(id).await {
        spinner.stop_error(&failure_message(app));
        return Err(e);
    }
    spinner.stop(&format!("Removed {}", id));

    Ok(())
}

fn failure_message(app: &App) -> String {
    app.library
        .request_state()
        .error_message
        .unwrap_or_else(|| "Request failed".to_string())
}

/// Build a book from `--data` JSON or `--title`/`--author`
fn parse_book(input: BookInput) -> BookshelfResult<Book> {
    if let Some(data) = input.data {
        let value: serde_json::Value = serde_json::from_str(&data)
            .map_err(|e| BookshelfError::User(format!("Invalid --data JSON: {}", e)))?;
        if !value.is_object() {
            return Err(BookshelfError::User(
                "--data must be a JSON object".to_string(),
            ));
        }
        return Ok(Book::from_json(value));
    }

    match input.title {
        Some(title) if !title.trim().is_empty() => Ok(Book::new(title, input.author)),
        _ => Err(BookshelfError::User("A book needs a title".to_string())),
    }
}
