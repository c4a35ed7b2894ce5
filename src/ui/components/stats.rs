//! Dashboard stat cards: labels over values, evenly spaced.

use crate::ui::helpers::{pad_to, position_cursor, truncate, visible_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatCard;

/// Renders the cards at `row` and returns the next free row (`row + 4`).
///
/// ```text
///   TOTAL USERS     ACTIVE BANS     DAILY REPORTS   NEXT EVENT
///   1000            5               42              Community Tag
/// ```
pub fn render_stat_cards(row: usize, cards: &[StatCard], theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(2) / cards.len().max(1);

    position_cursor(row, 1);
    pad_to(0, cols);

    position_cursor(row + 1, 1);
    print!("  ");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    for card in cards {
        let label = truncate(&card.label.to_uppercase(), width.saturating_sub(1));
        print!("{label}");
        print!("{}", " ".repeat(width.saturating_sub(visible_len(&label))));
    }
    pad_to(2 + width * cards.len(), cols);
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("  ");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    for card in cards {
        let value = truncate(&card.value, width.saturating_sub(1));
        print!("{value}");
        print!("{}", " ".repeat(width.saturating_sub(visible_len(&value))));
    }
    pad_to(2 + width * cards.len(), cols);
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    pad_to(0, cols);

    row + 4
}
