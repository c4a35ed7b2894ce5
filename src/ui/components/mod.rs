//! Composable UI component renderers.
//!
//! Each component renders one section of the panel at a given row and
//! returns the next free row, so sections stack without knowing about each
//! other.
//!
//! # Components
//!
//! - [`header`]: Title and session status
//! - [`stats`]: Dashboard counters
//! - [`actions`]: Action tiles and form
//! - [`login`]: Admin-name prompt
//! - [`search`]: Feed filter box
//! - [`feed`]: Live moderation log
//! - [`empty`]: Placeholder for an empty feed
//! - [`footer`]: Notice line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Stats | Login | Actions]   (page dependent)
//! [Search Bar]                (while filtering)
//! [Feed title]
//! [Feed lines | Empty state]
//! [Blank padding]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod actions;
mod empty;
mod feed;
mod footer;
mod header;
mod login;
mod search;
mod stats;

use crate::ui::helpers::{pad_to, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole panel.
///
/// Sections absent from the view model are skipped. Rows between the last
/// feed line and the notice are blanked so stale output never shows through.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(cards) = &vm.stats {
        current_row = stats::render_stat_cards(current_row, cards, theme, cols);
    }
    if let Some(login) = &vm.login {
        current_row = login::render_login(current_row, login, theme, cols);
    }
    if let Some(panel) = &vm.actions {
        current_row = actions::render_action_panel(current_row, panel, theme, cols);
    }
    if let Some(search) = &vm.search_bar {
        current_row = search::render_search_bar(current_row, search, theme, cols);
    }

    current_row = feed::render_feed_title(current_row, vm.feed.len(), theme, cols);
    current_row = match &vm.empty_feed {
        Some(empty) => empty::render_empty_state(current_row + 1, empty, theme, cols),
        None => feed::render_feed_lines(current_row, &vm.feed, theme, cols),
    };

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    while current_row < notice_row {
        position_cursor(current_row, 1);
        pad_to(0, cols);
        current_row += 1;
    }

    footer::render_notice(notice_row, vm.notice.as_deref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);
}
