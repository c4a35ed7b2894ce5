//! End-to-end flows: the event handler wired to a real worker on a temp dir.

use modpanel::app::{FormField, InputMode};
use modpanel::domain::{ActionKind, LogKind, LogRecord, ThemeChoice, ValidationError};
use modpanel::worker::{PanelWorker, WorkerMessage};
use modpanel::{handle_event, initialize, Action, AppState, Config, Event, Page};
use std::collections::VecDeque;
use std::path::Path;
use tempfile::TempDir;

/// One plugin instance: state plus its worker, with worker responses fed
/// back as events until the system is quiet.
struct Panel {
    state: AppState,
    worker: PanelWorker,
    posted: Vec<WorkerMessage>,
}

impl Panel {
    fn new(data_dir: &Path, store_file: Option<&Path>) -> Self {
        let config = Config {
            app_id: "test-server".to_string(),
            store_file: store_file.map(|p| p.to_string_lossy().into_owned()),
            ..Config::default()
        };
        Self {
            state: initialize(&config),
            worker: PanelWorker::new(data_dir.to_path_buf()),
            posted: vec![],
        }
    }

    fn booted(data_dir: &Path, store_file: Option<&Path>) -> Self {
        let mut panel = Self::new(data_dir, store_file);
        panel.send(Event::PermissionsGranted);
        panel
    }

    fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                if let Action::PostToWorker(message) = action {
                    self.posted.push(message.clone());
                    queue.extend(
                        self.worker
                            .handle_message(message)
                            .into_iter()
                            .map(Event::WorkerResponse),
                    );
                }
            }
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    fn login(&mut self, name: &str) {
        self.send(Event::LoginPrompt);
        self.type_text(name);
        self.send(Event::Submit);
        assert!(self.state.is_logged_in(), "login as {name} failed");
    }

    fn fill(&mut self, field: FormField, text: &str) {
        self.state.input_mode = InputMode::Editing(field);
        self.type_text(text);
    }

    fn appended_since(&self, mark: usize) -> Vec<&LogRecord> {
        self.posted[mark..]
            .iter()
            .filter_map(|m| match m {
                WorkerMessage::AppendLog { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    fn feed_actions(&self) -> Vec<&str> {
        self.state.feed.records().iter().map(|r| r.action.as_str()).collect()
    }
}

#[test]
fn boot_signs_in_subscribes_and_seeds_stats_once() {
    let dir = TempDir::new().unwrap();
    let panel = Panel::booted(dir.path(), None);

    assert!(panel.state.worker_ready);
    assert!(panel.state.session.identity().is_some());
    assert!(!panel.state.is_logged_in());
    assert!(panel.state.feed.is_active());

    let seeds = panel
        .posted
        .iter()
        .filter(|m| matches!(m, WorkerMessage::SeedStats { .. }))
        .count();
    assert_eq!(seeds, 1);

    let snapshot = panel.state.stats.snapshot().unwrap();
    assert_eq!(snapshot.total_users, 1000);
    assert_eq!(snapshot.next_event, "Community Tag");
}

#[test]
fn kick_appends_action_and_confirmation() {
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), None);
    panel.login("Steve");
    panel.send(Event::ShowPage(Page::Actions));
    panel.send(Event::SelectAction(ActionKind::Kick));
    panel.fill(FormField::Target, "Alex");

    let mark = panel.posted.len();
    panel.send(Event::Submit);

    let appended = panel.appended_since(mark);
    assert_eq!(appended.len(), 2);
    assert_eq!(appended[0].action, "KICK against Alex");
    assert_eq!(appended[0].kind, LogKind::Warn);
    assert_eq!(appended[0].admin_name, "Steve");

    let feed = panel.feed_actions();
    assert_eq!(feed[0], "Command sent successfully: KICK against Alex");
    assert_eq!(feed[1], "KICK against Alex");
    assert!(panel.state.form.target.is_empty());
}

#[test]
fn logged_out_execute_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), None);
    assert_eq!(panel.state.input_mode, InputMode::Login);

    // Dismiss the login prompt shown at boot.
    panel.send(Event::Escape);
    panel.send(Event::ShowPage(Page::Actions));
    panel.state.form.target = "Alex".to_string();

    let mark = panel.posted.len();
    panel.send(Event::Submit);

    assert!(panel.posted[mark..].is_empty());
    assert_eq!(panel.state.input_mode, InputMode::Login);
    assert_eq!(panel.state.notice.as_deref(), Some("Please log in first"));
}

#[test]
fn ban_without_reason_logs_error() {
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), None);
    panel.login("Steve");
    panel.send(Event::ShowPage(Page::Actions));
    panel.fill(FormField::Target, "Alex");
    panel.fill(FormField::Duration, "7d");
    panel.send(Event::Submit);

    let newest = &panel.state.feed.records()[0];
    assert_eq!(newest.kind, LogKind::Error);
    assert_eq!(newest.action, ValidationError::MissingReason.feed_message("ban"));
    assert_eq!(panel.state.form.target, "Alex");
}

#[test]
fn feed_keeps_newest_fifty_in_descending_order() {
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), None);
    panel.login("Steve");

    for i in 0..60 {
        let record = LogRecord::new("uid", "Bot", format!("entry {i}"), LogKind::Info);
        let responses = panel.worker.handle_message(WorkerMessage::append_log(record));
        for response in responses {
            panel.send(Event::WorkerResponse(response));
        }
    }

    let records = panel.state.feed.records();
    assert_eq!(records.len(), 50);
    assert_eq!(records[0].action, "entry 59");
    assert!(records
        .windows(2)
        .all(|pair| pair[0].sort_millis() >= pair[1].sort_millis()));
}

#[test]
fn theme_and_login_survive_reload() {
    let dir = TempDir::new().unwrap();
    let identity = {
        let mut panel = Panel::booted(dir.path(), None);
        panel.login("Steve");
        panel.send(Event::ToggleTheme);
        assert_eq!(panel.state.theme.name, "light");
        panel.state.session.identity().cloned()
    };

    let panel = Panel::booted(dir.path(), None);
    assert_eq!(panel.state.session.identity().cloned(), identity);
    assert_eq!(panel.state.session.theme(), ThemeChoice::Light);
    assert_eq!(panel.state.theme.name, "light");
    assert_eq!(panel.state.session.display_name(), "Steve");
}

#[test]
fn logout_obtains_a_fresh_identity() {
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), None);
    panel.login("Steve");
    let before = panel.state.session.identity().cloned();

    panel.send(Event::Logout);

    assert!(!panel.state.is_logged_in());
    assert!(panel.state.session.identity().is_some());
    assert_ne!(panel.state.session.identity().cloned(), before);
    assert!(panel.state.feed.is_active());
    assert!(panel
        .feed_actions()
        .contains(&"Logged out successfully."));
}

#[test]
fn feed_resumes_after_store_file_recovers() {
    let shared = TempDir::new().unwrap();
    let store = shared.path().join("store.json");
    let dir = TempDir::new().unwrap();
    let mut panel = Panel::booted(dir.path(), Some(&store));
    panel.login("Steve");

    let healthy = std::fs::read(&store).unwrap();
    std::fs::write(&store, "{ not json").unwrap();
    panel.send(Event::Timer);

    assert!(!panel.state.feed.is_active());
    assert!(!panel.state.stats.is_active());
    assert!(panel.state.notice.is_some());

    std::fs::write(&store, healthy).unwrap();
    panel.send(Event::Timer);
    assert!(panel.state.feed.is_active());
    assert!(panel.state.stats.is_active());

    panel.send(Event::ShowPage(Page::Actions));
    assert_eq!(panel.feed_actions()[0], "Navigated to: actions");
}

#[test]
fn panels_sharing_a_store_see_each_other() {
    let shared = TempDir::new().unwrap();
    let store = shared.path().join("store.json");
    let (dir_a, dir_b) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    let mut alice = Panel::booted(dir_a.path(), Some(&store));
    let mut bob = Panel::booted(dir_b.path(), Some(&store));
    alice.login("Alice");
    bob.login("Bob");
    assert_ne!(alice.state.session.identity(), bob.state.session.identity());

    bob.send(Event::ShowPage(Page::Actions));
    bob.send(Event::SelectAction(ActionKind::Kick));
    bob.fill(FormField::Target, "Mallory");
    bob.send(Event::Submit);

    alice.send(Event::Timer);
    assert!(alice.feed_actions().contains(&"KICK against Mallory"));

    let seeds = alice
        .posted
        .iter()
        .chain(&bob.posted)
        .filter(|m| matches!(m, WorkerMessage::SeedStats { .. }))
        .count();
    assert_eq!(seeds, 1);
}
