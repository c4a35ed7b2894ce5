//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready strings, flags and highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use modpanel::ui::viewmodel::{FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " ModPanel | dashboard ".to_string(),
//!         status: "Not logged in".to_string(),
//!     },
//!     stats: None,
//!     actions: None,
//!     login: None,
//!     search_bar: None,
//!     feed: vec![],
//!     empty_feed: None,
//!     notice: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.feed.is_empty());
//! ```

use crate::domain::{Accent, LogKind};

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Stats cards; present on the dashboard page.
    pub stats: Option<Vec<StatCard>>,

    /// Action tiles and form; present on the actions page while logged in.
    pub actions: Option<ActionPanel>,

    /// Login box; present while nobody is logged in.
    pub login: Option<LoginPrompt>,

    /// Search box; present while a feed filter is being typed or applied.
    pub search_bar: Option<SearchBarInfo>,

    /// Visible log lines, newest first, already filtered and windowed.
    pub feed: Vec<FeedLine>,

    /// Shown in place of the feed when it has nothing to display.
    pub empty_feed: Option<EmptyState>,

    /// Transient message shown above the footer.
    pub notice: Option<String>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Centered title, including the current page.
    pub title: String,

    /// Right-hand status: admin, identity and theme.
    pub status: String,
}

/// One dashboard counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

/// Action tiles plus the form driven by the selected action's policy.
#[derive(Debug, Clone)]
pub struct ActionPanel {
    pub tiles: Vec<ActionTile>,
    pub fields: Vec<FormFieldView>,
}

/// A selectable action tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTile {
    /// Key that selects this tile.
    pub key: char,
    pub label: String,
    pub accent: Accent,
    pub is_selected: bool,
}

/// One visible field of the action form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
}

/// The admin-name prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPrompt {
    pub input: String,

    /// Whether keystrokes currently go to the prompt.
    pub is_active: bool,
}

/// One rendered log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    /// `HH:MM:SS`, or `--:--:--` while unstamped.
    pub clock: String,

    /// `admin -> action (target)`.
    pub text: String,

    /// Severity, used for the line colour.
    pub kind: LogKind,

    /// Character ranges of `text` matched by the feed filter.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the search box.
    pub is_active: bool,
}
