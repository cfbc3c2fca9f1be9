//! Logout command - forget the stored session

use crate::app::App;
use crate::error::BookshelfResult;
use crate::ui::{self, UiContext};

/// Execute the logout command
pub async fn execute(app: &App) -> BookshelfResult<()> {
    let ctx = UiContext::detect();
    let was_signed_in = app.session.is_authenticated();

    app.session.logout();

    if was_signed_in {
        ui::step_ok(&ctx, "Signed out");
    } else {
        ui::step_info(&ctx, "Not signed in");
    }
    Ok(())
}
