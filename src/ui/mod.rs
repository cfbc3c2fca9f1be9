//! UI module for consistent CLI output
//!
//! Uses `cliclack` for prompts and spinners, with automatic fallback to
//! plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Searching...");
//! // ... do work ...
//! spinner.stop("3 results");
//!
//! let yes = ui::confirm(&ctx, "Remove book?", false).await?;
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{key_value, key_value_status, remark, step_info, step_ok, step_warn_hint};
pub use progress::TaskSpinner;
pub use prompts::{confirm, input, password};
pub use theme::{init_theme, BookshelfTheme};
