//! Login command - sign in and persist the session

use super::{enter, LOGIN_ROUTE};
use crate::app::App;
use crate::cli::args::LoginArgs;
use crate::error::{BookshelfError, BookshelfResult};
use crate::guard::Navigation;
use crate::ui::{self, UiContext};

/// Execute the login command
pub async fn execute(args: LoginArgs, app: &App) -> BookshelfResult<()> {
    let ctx = UiContext::detect();

    if let Navigation::Redirect(_) = enter(app, LOGIN_ROUTE)? {
        ui::step_warn_hint(&ctx, "Already signed in", "Run: bookshelf logout to switch accounts");
        return Ok(());
    }

    let username = match args.username {
        Some(username) => username,
        None => ui::input(&ctx, "Username").await?,
    };
    let password = match args.password {
        Some(password) => password,
        None => ui::password(&ctx, "Password").await?,
    };

    let signed_in = app.session.login(&username, &password);
    let message = app.session.status_message().unwrap_or_default();

    if !signed_in {
        return Err(BookshelfError::Login(message));
    }

    ui::step_ok(&ctx, &message);
    Ok(())
}
