//! Footer component renderer: notice line and keybinding hints.

use crate::ui::helpers::{pad_to, position_cursor, truncate, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered at `row`.
///
/// Text wider than the terminal is truncated to keep the layout intact.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = visible_len(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    pad_to(padding + text_len, cols);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the transient notice, or a blank line when there is none.
pub fn render_notice(row: usize, notice: Option<&str>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match notice {
        Some(text) => {
            let text = truncate(&format!(" ! {text}"), cols);
            print!("{}", Theme::fg(&theme.colors.accent_yellow));
            print!("{text}");
            pad_to(visible_len(&text), cols);
            print!("{}", Theme::reset());
        }
        None => pad_to(0, cols),
    }
    row + 1
}
