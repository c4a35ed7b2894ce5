//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin thread knows:
//! the session, the selected action, the two live projections, the form
//! input and the current mode. Worker I/O never happens here; the event
//! handler turns state transitions into [`Action`](super::Action)s.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel): it picks the page
//! sections, applies the feed filter with fuzzy highlighting, and windows the
//! feed to the rows left after the chrome.

use super::modes::{FormField, InputMode, Page};
use crate::domain::{ActionKind, ThemeChoice, NO_EVENT};
use crate::moderation::{
    ActionSelector, LogFeedProjector, SessionPhase, SessionState, StatsProjector,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ActionPanel, ActionTile, EmptyState, FeedLine, FooterInfo, FormFieldView, HeaderInfo,
    LoginPrompt, SearchBarInfo, StatCard, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Settings the plugin hands to the worker and uses for scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Namespace for every store path.
    pub app_id: String,
    /// Custom sign-in token; anonymous sign-in when `None`.
    pub auth_token: Option<String>,
    /// Store file override.
    pub store_file: Option<String>,
    /// Seconds between worker polls.
    pub poll_interval: f64,
    /// Size of the live feed window.
    pub feed_limit: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            app_id: crate::DEFAULT_APP_ID.to_string(),
            auth_token: None,
            store_file: None,
            poll_interval: 2.0,
            feed_limit: crate::moderation::DEFAULT_FEED_LIMIT,
        }
    }
}

/// Raw text of the action form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionForm {
    pub target: String,
    pub reason: String,
    pub duration: String,
}

impl ActionForm {
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Target => &mut self.target,
            FormField::Reason => &mut self.reason,
            FormField::Duration => &mut self.duration,
        }
    }

    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Target => &self.target,
            FormField::Reason => &self.reason,
            FormField::Duration => &self.duration,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Central application state container.
///
/// Mutated only by the event handler. The UI reads it through
/// [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Identity, profile and login phase.
    pub session: SessionState,

    /// Currently selected moderation action.
    pub selector: ActionSelector,

    /// Live, ordered window over the shared log.
    pub feed: LogFeedProjector,

    /// Latest dashboard counters.
    pub stats: StatsProjector,

    pub form: ActionForm,

    /// Admin name being typed into the login prompt.
    pub login_input: String,

    pub input_mode: InputMode,

    pub page: Page,

    /// Fuzzy filter over the visible feed.
    pub search_query: String,

    /// Palette in use, derived from the session's theme choice.
    pub theme: Theme,

    /// Palette loaded from a custom theme file; wins over the built-ins.
    pub custom_theme: Option<Theme>,

    /// Transient message shown above the footer.
    pub notice: Option<String>,

    pub settings: RuntimeSettings,

    /// The worker answered `Init`.
    pub worker_ready: bool,

    /// A sign-out was requested to obtain a fresh identity; the next
    /// signed-out notification triggers the sign-in.
    pub renewing_identity: bool,
}

impl AppState {
    /// Creates a logged-out state on the dashboard.
    #[must_use]
    pub fn new(settings: RuntimeSettings, theme: Theme) -> Self {
        Self {
            session: SessionState::default(),
            selector: ActionSelector::default(),
            feed: LogFeedProjector::new(settings.feed_limit),
            stats: StatsProjector::default(),
            form: ActionForm::default(),
            login_input: String::new(),
            input_mode: InputMode::Normal,
            page: Page::default(),
            search_query: String::new(),
            theme,
            custom_theme: None,
            notice: None,
            settings,
            worker_ready: false,
            renewing_identity: false,
        }
    }

    /// Re-derives the palette after the session's theme choice changed.
    pub fn refresh_theme(&mut self) {
        self.theme = self
            .custom_theme
            .clone()
            .unwrap_or_else(|| Theme::for_choice(self.session.theme()));
    }

    /// Applies the locally remembered theme, if no profile has set one yet.
    pub fn apply_preferred_theme(&mut self, theme: ThemeChoice) {
        self.session.apply_preferred_theme(theme);
        self.refresh_theme();
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.phase() == SessionPhase::LoggedIn
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// The feed gets whatever rows remain after the header, the page
    /// section, the optional search bar and the footer.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let stats = (self.page == Page::Dashboard).then(|| self.compute_stats());
        let login = (!self.is_logged_in()).then(|| LoginPrompt {
            input: self.login_input.clone(),
            is_active: self.input_mode == InputMode::Login,
        });
        let actions = (self.page == Page::Actions && login.is_none())
            .then(|| self.compute_action_panel());
        let search_bar = self.compute_search_bar();

        let chrome = Self::chrome_rows(stats.is_some(), actions.as_ref(), login.is_some(), search_bar.is_some());
        let available_rows = rows.saturating_sub(chrome);

        let matcher = (!self.search_query.is_empty()).then(SkimMatcherV2::default);
        let feed: Vec<FeedLine> = self
            .feed
            .records()
            .iter()
            .filter_map(|record| {
                let text = Self::feed_text(record, cols);
                let highlight_ranges = match &matcher {
                    Some(m) => self.compute_highlight_ranges(&text, m)?,
                    None => vec![],
                };
                Some(FeedLine {
                    clock: record.clock(),
                    text,
                    kind: record.kind,
                    highlight_ranges,
                })
            })
            .take(available_rows)
            .collect();

        let empty_feed = feed.is_empty().then(|| self.compute_empty_feed());

        UIViewModel {
            header: self.compute_header(),
            stats,
            actions,
            login,
            search_bar,
            feed,
            empty_feed,
            notice: self.notice.clone(),
            footer: self.compute_footer(),
        }
    }

    /// Rows used by everything except the feed lines.
    fn chrome_rows(has_stats: bool, actions: Option<&ActionPanel>, has_login: bool, has_search: bool) -> usize {
        // blank, header, border, feed title, notice, border, footer
        let mut rows = 7;
        if has_stats {
            rows += 4;
        }
        if let Some(panel) = actions {
            rows += 3 + panel.fields.len();
        }
        if has_login {
            rows += 4;
        }
        if has_search {
            rows += 3;
        }
        rows
    }

    fn feed_text(record: &crate::domain::LogRecord, cols: usize) -> String {
        let mut text = format!("{} -> {}", record.author(), record.action);
        if let Some(target) = record.target() {
            text.push_str(&format!(" ({target})"));
        }

        // "[HH:MM:SS] " takes 11 columns
        let max = cols.saturating_sub(12);
        if text.chars().count() > max && max > 3 {
            let kept: String = text.chars().take(max - 3).collect();
            text = format!("{kept}...");
        }
        text
    }

    /// Character index ranges to highlight for the current filter.
    ///
    /// Returns `None` when `text` does not match, so the line is filtered
    /// out. Consecutive matched indices are coalesced into `(start, end)`
    /// ranges with an exclusive end.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Option<Vec<(usize, usize)>> {
        use fuzzy_matcher::FuzzyMatcher;

        let (_score, indices) = matcher.fuzzy_indices(text, &self.search_query)?;

        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        Some(ranges)
    }

    fn compute_stats(&self) -> Vec<StatCard> {
        let snapshot = self.stats.snapshot();
        let count = |value: Option<i64>| value.unwrap_or(0).to_string();

        vec![
            StatCard {
                label: "Total Users".to_string(),
                value: count(snapshot.map(|s| s.total_users)),
            },
            StatCard {
                label: "Active Bans".to_string(),
                value: count(snapshot.map(|s| s.active_bans)),
            },
            StatCard {
                label: "Daily Reports".to_string(),
                value: count(snapshot.map(|s| s.daily_reports)),
            },
            StatCard {
                label: "Next Event".to_string(),
                value: snapshot.map_or_else(|| NO_EVENT.to_string(), |s| s.next_event.clone()),
            },
        ]
    }

    fn compute_action_panel(&self) -> ActionPanel {
        let selected = self.selector.selected();
        let policy = self.selector.policy();

        let tiles = ActionKind::BUILT_IN
            .iter()
            .zip('1'..='9')
            .map(|(kind, key)| ActionTile {
                key,
                label: kind.name().to_uppercase(),
                accent: kind.policy().accent,
                is_selected: kind == selected,
            })
            .collect();

        let focused = match self.input_mode {
            InputMode::Editing(field) => Some(field),
            _ => None,
        };

        let mut shown = vec![FormField::Target, FormField::Reason];
        if policy.accepts_duration {
            shown.push(FormField::Duration);
        }

        let fields = shown
            .into_iter()
            .map(|field| FormFieldView {
                label: match field {
                    FormField::Reason => policy.reason_prompt.to_string(),
                    other => other.label().to_string(),
                },
                value: self.form.field(field).to_string(),
                is_focused: focused == Some(field),
            })
            .collect();

        ActionPanel { tiles, fields }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = if self.is_logged_in() {
            format!(
                "Admin: {} | ID: {} | Theme: {}",
                self.session.display_name(),
                self.session.identity_str(),
                self.session.theme().label()
            )
        } else {
            format!("Not logged in | Theme: {}", self.session.theme().label())
        };

        HeaderInfo {
            title: format!(" ModPanel | {} ", self.page),
            status,
        }
    }

    fn compute_empty_feed(&self) -> EmptyState {
        if !self.search_query.is_empty() {
            EmptyState {
                message: "No log entries match".to_string(),
                subtitle: "Esc clears the filter".to_string(),
            }
        } else if self.feed.is_active() {
            EmptyState {
                message: "No moderation activity yet".to_string(),
                subtitle: "Executed actions appear here".to_string(),
            }
        } else {
            EmptyState {
                message: "Live log not connected".to_string(),
                subtitle: "Waiting for sign-in".to_string(),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.page) {
            (InputMode::Login, _) => "Type your admin name  Enter: log in  Esc: cancel".to_string(),
            (InputMode::Search, _) => "Type to filter the log  Enter: keep filter  Esc: clear".to_string(),
            (InputMode::Editing(_), _) => "Tab: next field  Enter: execute  Esc: done".to_string(),
            (InputMode::Normal, Page::Actions) => {
                "1-5: action  i: edit  Enter: execute  d: dashboard  /: search  t: theme  L: logout  q: quit".to_string()
            }
            (InputMode::Normal, Page::Dashboard) => {
                "a: actions  /: search  t: theme  l: login  L: logout  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let is_active = self.input_mode == InputMode::Search;
        (is_active || !self.search_query.is_empty()).then(|| SearchBarInfo {
            query: self.search_query.clone(),
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, LogKind, LogRecord};
    use serde_json::json;

    fn logged_in() -> AppState {
        let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
        state.session.on_identity(Some(Identity::new("uid-1")));
        state.session.login("Steve");
        state
    }

    fn doc(ts: i64, action: &str, target: &str) -> crate::domain::Document {
        json!({
            "timestamp": ts,
            "adminId": "uid-1",
            "adminName": "Steve",
            "action": action,
            "targetUser": target,
            "type": "warn",
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn logged_out_state_shows_login_and_hides_form() {
        let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
        state.page = Page::Actions;
        let vm = state.compute_viewmodel(40, 100);
        assert!(vm.login.is_some());
        assert!(vm.actions.is_none());
        assert!(vm.header.status.starts_with("Not logged in"));
    }

    #[test]
    fn stats_fall_back_before_first_delivery() {
        let state = logged_in();
        let vm = state.compute_viewmodel(40, 100);
        let stats = vm.stats.unwrap();
        assert_eq!(stats[0].value, "0");
        assert_eq!(stats[3].value, NO_EVENT);
    }

    #[test]
    fn form_shows_duration_only_when_accepted() {
        let mut state = logged_in();
        state.page = Page::Actions;

        let ban = state.compute_viewmodel(40, 100).actions.unwrap();
        assert_eq!(ban.fields.len(), 3);
        assert!(ban.tiles[0].is_selected);

        state.selector.select(ActionKind::Kick, &state.session);
        let kick = state.compute_viewmodel(40, 100).actions.unwrap();
        assert_eq!(kick.fields.len(), 2);
        assert_eq!(kick.fields[1].label, "Reason (optional):");
    }

    #[test]
    fn feed_lines_render_author_action_and_target() {
        let mut state = logged_in();
        state.feed.subscribe();
        let mut system = LogRecord::new("uid-1", "", "boot", LogKind::System).to_document();
        system.remove("timestamp");
        state.feed.apply(&[doc(100, "KICK against Alex", "Alex"), system]);

        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(vm.feed[0].text, "Steve -> KICK against Alex (Alex)");
        assert_eq!(vm.feed[1].text, "uid-1 -> boot");
        assert_eq!(vm.feed[1].clock, "--:--:--");
    }

    #[test]
    fn search_filters_and_highlights_feed() {
        let mut state = logged_in();
        state.feed.subscribe();
        state.feed.apply(&[doc(100, "BAN against Alex", "Alex"), doc(50, "MUTE against Bob", "Bob")]);
        state.search_query = "bob".to_string();

        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(vm.feed.len(), 1);
        assert!(vm.feed[0].text.contains("Bob"));
        assert!(!vm.feed[0].highlight_ranges.is_empty());
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn feed_is_windowed_to_available_rows() {
        let mut state = logged_in();
        state.feed.subscribe();
        let docs: Vec<_> = (0..30).map(|i| doc(i, "WARN against Zed", "Zed")).collect();
        state.feed.apply(&docs);

        let vm = state.compute_viewmodel(20, 100);
        assert_eq!(vm.feed.len(), 20 - 11);
    }
}
