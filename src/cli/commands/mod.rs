//! CLI command implementations

pub mod config;
pub mod library;
pub mod login;
pub mod logout;
pub mod recent;
pub mod search;
pub mod whoami;

pub use config::execute as config;
pub use library::execute as library;
pub use login::execute as login;
pub use logout::execute as logout;
pub use recent::execute as recent;
pub use search::execute as search;
pub use whoami::execute as whoami;

use crate::app::App;
use crate::cli::args::OutputFormat;
use crate::error::{BookshelfError, BookshelfResult};
use crate::guard::Navigation;
use crate::library::Book;
use console::style;

pub const LOGIN_ROUTE: &str = "/login";
pub const SEARCH_ROUTE: &str = "/search";
pub const RECENT_ROUTE: &str = "/search/recent";
pub const LIBRARY_ROUTE: &str = "/library";

/// Run the route guard for a command.
///
/// A redirect to the login page becomes `NotAuthenticated`; any other
/// redirect is handed back to the command.
fn enter(app: &App, route: &str) -> BookshelfResult<Navigation> {
    match app.guard.check(route) {
        Navigation::Redirect(target) if target == app.guard.policy().login_path => {
            Err(BookshelfError::NotAuthenticated)
        }
        navigation => Ok(navigation),
    }
}

fn print_books(books: &[Book], format: OutputFormat) -> BookshelfResult<()> {
    match format {
        OutputFormat::Table => print_table(books),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(books)?),
        OutputFormat::Plain => {
            for book in books {
                println!("{}", book.title().unwrap_or("untitled"));
            }
        }
    }
    Ok(())
}

fn print_table(books: &[Book]) {
    println!(
        "{:<26} {:<40} {:<30}",
        style("ID").bold(),
        style("TITLE").bold(),
        style("AUTHOR").bold()
    );
    println!("{}", "-".repeat(96));

    for book in books {
        println!(
            "{:<26} {:<40} {:<30}",
            truncate(&book.id().unwrap_or_else(|| "-".to_string()), 26),
            truncate(book.title().unwrap_or("untitled"), 40),
            truncate(&book.author().unwrap_or_else(|| "unknown".to_string()), 30),
        );
    }

    println!();
    println!("{} book(s)", books.len());
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
