//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the ModPanel library and the Zellij
//! plugin system. It implements `ZellijPlugin` for the UI thread and
//! `ZellijWorker` for the background thread, translating Zellij events into
//! library [`Event`]s and library [`Action`]s into Zellij calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC (JSON)   │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  PanelWorker     │   │  ← Store, identity, preferences
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `CustomMessage`, `Timer` and
//!    permission events
//! 3. **Permissions Granted**: Worker opens the store and signs in; the poll
//!    timer starts
//! 4. **Timer**: Ask the worker to pick up writes from other panels
//! 5. **Update / Render**: Delegate to the library layer
//!
//! # Keybindings
//!
//! In normal mode:
//! - `1`-`5`: Select ban / kick / warn / mute / unban
//! - `i`: Edit the action form
//! - `Enter`: Execute the selected action
//! - `d` / `a`: Dashboard / actions page
//! - `/`: Filter the log
//! - `t`: Toggle dark / light theme
//! - `l` / `L`: Log in / log out
//! - `Esc`: Clear filter and notice
//! - `q`: Close plugin
//!
//! While typing (form, filter, login):
//! - `Tab`: Next form field
//! - `Enter`: Submit
//! - `Esc`: Stop typing
//! - `Backspace`: Delete a character

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use modpanel::domain::ActionKind;
use modpanel::worker::{PanelWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use modpanel::{handle_event, Action, Config, Event, InputMode, Page};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(PanelWorkerShim, modpanel_worker, MODPANEL_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: modpanel::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: modpanel::initialize(&Config::default()),
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, then requests
    /// permissions. Nothing reaches the worker until they are granted.
    ///
    /// # Permissions
    ///
    /// - `FullHdAccess`: the shared store and local preference files
    /// - `ChangeApplicationState`: hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        modpanel::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(app_id = %config.app_id, feed_limit = config.feed_limit, "parsed configuration");
        self.app = modpanel::initialize(&config);

        request_permission(&[
            PermissionType::FullHdAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates Zellij events, delegates to `handle_event`, and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Self::map_permission_result(status)
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in &actions {
                    self.execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        modpanel::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// While the user is typing, every character goes to the input; the
    /// single-key commands only apply in normal mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if self.app.input_mode.is_typing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Tab => Event::NextField,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        debug_assert_eq!(self.app.input_mode, InputMode::Normal);

        Some(match key.bare_key {
            BareKey::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Event::SelectAction(ActionKind::BUILT_IN[index].clone())
            }
            BareKey::Char('i') | BareKey::Tab => Event::EditForm,
            BareKey::Enter => Event::Submit,
            BareKey::Char('d') => Event::ShowPage(Page::Dashboard),
            BareKey::Char('a') => Event::ShowPage(Page::Actions),
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('l') => Event::LoginPrompt,
            BareKey::Char('L') => Event::Logout,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn map_permission_result(status: PermissionStatus) -> Event {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - starting worker");
                Event::PermissionsGranted
            }
            PermissionStatus::Denied => Event::PermissionsDenied,
        }
    }

    /// Maps worker responses; custom messages with other names are ignored.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` as JSON and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
            Action::SetTimeout(secs) => set_timeout(*secs),
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Zellij-facing wrapper around [`PanelWorker`].
///
/// Zellij requires workers to be serializable; the real worker holds open
/// files and is created on the first message.
#[derive(Default, Serialize, Deserialize)]
struct PanelWorkerShim {
    #[serde(skip)]
    inner: Option<PanelWorker>,
}

impl ZellijWorker<'_> for PanelWorkerShim {
    /// Deserializes the message, runs it through the worker, and posts
    /// every response back to the plugin under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            modpanel::observability::init_tracing(&Config::default());
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let worker = self.inner.get_or_insert_with(PanelWorker::default);

        for response in worker.handle_message(worker_message) {
            match serde_json::to_string(&response) {
                Ok(payload) => post_message_to_plugin(PluginMessage {
                    name: message.clone(),
                    payload,
                    worker_name: None,
                }),
                Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
            }
        }
    }
}
