//! Output functions for consistent CLI formatting

use super::context::UiContext;
use console::{style, Style};

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Info,
    Warn,
}

impl Level {
    fn tag(self) -> console::StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Info => style("[INFO]").cyan(),
            Self::Warn => style("[WARN]").yellow(),
        }
    }
}

fn step(ctx: &UiContext, level: Level, message: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", level.tag(), message);
        return;
    }

    let shown = match level {
        Level::Ok => cliclack::log::success(message),
        Level::Info => cliclack::log::info(message),
        Level::Warn => cliclack::log::warning(message),
    };
    shown.ok();
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    step(ctx, Level::Ok, message);
}

/// Display an info step
pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Level::Info, message);
}

/// Display a warning step with hint
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        step(ctx, Level::Warn, &format!("{} - {}", message, style(hint).dim()));
    } else {
        step(ctx, Level::Warn, &format!("{} - {}", message, hint));
    }
}

/// Display a remark/hint
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print a key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.use_fancy_output() {
        style(key).dim().to_string()
    } else {
        key.to_string()
    };
    println!("  {}: {}", key, value);
}

/// Print a key-value pair colored by whether the value is the good one
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    if !ctx.use_fancy_output() {
        let level = if ok { Level::Ok } else { Level::Warn };
        println!("  {} {}: {}", level.tag(), key, value);
        return;
    }

    let value_style = if ok {
        Style::new().green()
    } else {
        Style::new().yellow()
    };
    println!("  {}: {}", style(key).dim(), value_style.apply_to(value));
}
