//! Prompt and spinner styling

use cliclack::ThemeState;
use console::{style, Emoji, Style};

/// Spines filling a shelf, one per tick
const SHELF: Emoji = Emoji("▏▎▍▌▋▊▉█", "|/-\\");
const BOOKMARK: Emoji = Emoji("❯", ">");
const SHELVED: Emoji = Emoji("▣", "#");
const PASSWORD_MASK: char = '•';

/// Magenta prompts, a shelf-filling spinner and bookmark log markers
#[derive(Debug, Clone, Default)]
pub struct BookshelfTheme;

impl BookshelfTheme {
    fn accent(&self) -> Style {
        Style::new().magenta()
    }
}

impl cliclack::Theme for BookshelfTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => self.accent(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel | ThemeState::Submit => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => self.accent().bold(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }

    fn info_symbol(&self) -> String {
        self.accent().apply_to(BOOKMARK).to_string()
    }

    fn submit_symbol(&self) -> String {
        style(SHELVED).green().to_string()
    }

    fn password_mask(&self) -> char {
        PASSWORD_MASK
    }

    fn spinner_chars(&self) -> String {
        SHELF.to_string()
    }
}

/// Install the theme for all cliclack output
pub fn init_theme() {
    cliclack::set_theme(BookshelfTheme);
}
