//! Login prompt component renderer.

use crate::ui::helpers::{pad_to, position_cursor, truncate, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoginPrompt;

const LOGIN_BOX_MARGIN: usize = 5;

/// Renders the prompt at `row` and returns the next free row (`row + 4`).
pub fn render_login(row: usize, login: &LoginPrompt, theme: &Theme, cols: usize) -> usize {
    let hint = if login.is_active {
        "Enter your admin name to continue"
    } else {
        "Not logged in. Press l to log in"
    };
    let hint = truncate(hint, cols.saturating_sub(LOGIN_BOX_MARGIN));

    position_cursor(row, 1);
    print!("{}", " ".repeat(LOGIN_BOX_MARGIN));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{hint}");
    print!("{}", Theme::reset());
    pad_to(LOGIN_BOX_MARGIN + visible_len(&hint), cols);

    let inner_width = cols.saturating_sub(LOGIN_BOX_MARGIN * 2 + 2);
    let border = if login.is_active {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(LOGIN_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if login.is_active { "_" } else { "" };
    let text = truncate(&format!(" Admin name: {}{cursor}", login.input), inner_width);

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(LOGIN_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}");
    print!("{}", " ".repeat(inner_width.saturating_sub(visible_len(&text))));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{}", " ".repeat(LOGIN_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 4
}
