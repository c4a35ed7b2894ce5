//! Live log feed renderer.
//!
//! Each line is `[HH:MM:SS] admin -> action (target)`, coloured by the
//! record's kind, with filter matches highlighted.

use crate::ui::helpers::{self, pad_to, position_cursor, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FeedLine;

/// Renders the feed title at `row` and returns the next free row.
pub fn render_feed_title(row: usize, count: usize, theme: &Theme, cols: usize) -> usize {
    let title = format!("LIVE MODERATION LOG ({count})");

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());
    pad_to(visible_len(&title), cols);
    row + 1
}

/// Renders every line starting at `row` and returns the next free row.
pub fn render_feed_lines(row: usize, lines: &[FeedLine], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for line in lines {
        current_row = render_feed_line(current_row, line, theme, cols);
    }
    current_row
}

fn render_feed_line(row: usize, line: &FeedLine, theme: &Theme, cols: usize) -> usize {
    let color = theme.colors.log_kind(line.kind);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("[{}] ", line.clock);
    print!("{}", Theme::fg(color));
    helpers::render_highlighted_text(&line.text, &line.highlight_ranges, theme, color);
    pad_to(visible_len(&line.clock) + 3 + visible_len(&line.text), cols);
    print!("{}", Theme::reset());
    row + 1
}
