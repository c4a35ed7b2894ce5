//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across the UI components: cursor positioning,
//! width-aware padding and fuzzy match highlighting with correct ANSI
//! escape sequence management.
//!
//! # Example
//!
//! ```rust
//! use modpanel::ui::helpers::render_highlighted_text;
//! use modpanel::ui::Theme;
//!
//! let theme = Theme::default();
//! // Highlight "Ste" of an author name, then continue in the normal colour.
//! render_highlighted_text("Steve -> KICK", &[(0, 3)], &theme, &theme.colors.text_normal);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal columns `text` occupies, counting one per char.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if visible_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Prints spaces from column `used` up to the terminal width.
pub fn pad_to(used: usize, cols: usize) {
    print!("{}", " ".repeat(cols.saturating_sub(used)));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with an exclusive end.
/// After each highlighted section the `base_fg` colour is restored, so the
/// rest of the line keeps its severity colour.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base_fg: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start.max(current_pos)..end.max(current_pos)].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = current_pos.max(end);
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
