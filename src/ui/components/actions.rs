//! Action tiles and the action form.
//!
//! Tiles are coloured by their accent; the selected tile is drawn inverted.
//! Only the fields the selected action's policy shows are listed.

use crate::ui::helpers::{pad_to, position_cursor, truncate, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ActionPanel, FormFieldView};

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 36;

/// Renders tiles and form at `row`; returns `row + 3 + fields`.
pub fn render_action_panel(row: usize, panel: &ActionPanel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 2;
    print!("  ");
    for tile in &panel.tiles {
        let text = format!(" {} {} ", tile.key, tile.label);
        let accent = theme.colors.accent(tile.accent);
        if tile.is_selected {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(accent));
        } else {
            print!("{}", Theme::fg(accent));
        }
        print!("{text}");
        print!("{}", Theme::reset());
        print!(" ");
        used += visible_len(&text) + 1;
    }
    pad_to(used, cols);

    position_cursor(row + 1, 1);
    pad_to(0, cols);

    let mut current_row = row + 2;
    for field in &panel.fields {
        current_row = render_field(current_row, field, theme, cols);
    }

    position_cursor(current_row, 1);
    pad_to(0, cols);
    current_row + 1
}

fn render_field(row: usize, field: &FormFieldView, theme: &Theme, cols: usize) -> usize {
    let label = truncate(&field.label, LABEL_WIDTH - 1);
    let value_width = cols.saturating_sub(LABEL_WIDTH + 4);
    let cursor = if field.is_focused { "_" } else { "" };
    let value = truncate(&format!("{}{cursor}", field.value), value_width);

    position_cursor(row, 1);
    print!("  ");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");
    print!("{}", " ".repeat(LABEL_WIDTH.saturating_sub(visible_len(&label))));
    print!("{}", Theme::reset());

    if field.is_focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("[{value}");
    print!("{}", " ".repeat(value_width.saturating_sub(visible_len(&value))));
    print!("]");
    print!("{}", Theme::reset());
    pad_to(2 + LABEL_WIDTH + value_width + 2, cols);
    row + 1
}
