//! Header component renderer.
//!
//! One line: the bold title on the left, the session status on the right.

use crate::ui::helpers::{position_cursor, truncate, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar at `row` and returns the next free row.
///
/// The status is dropped first when the terminal is too narrow for both.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = visible_len(&title);
    let room = cols.saturating_sub(title_len + 1);
    let status = if room >= 8 { truncate(&header.status, room) } else { String::new() };
    let status_len = visible_len(&status);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(title_len + status_len)));
    print!("{}", Theme::reset());

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{status}");
    print!("{}", Theme::reset());
    row + 1
}
