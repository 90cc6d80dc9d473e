//! Canvas surface: the full clip management window.
//!
//! Owns the per-window state (clip cache, selection, pastebooks, feedback)
//! and communicates with the bridge worker via channels so the `update` loop
//! never blocks on backend I/O. The cache is never authoritative: every
//! mutation is confirmed by the backend through [`apply_event`] before it is
//! considered durable.
//!
//! [`apply_event`]: CanvasApp::apply_event

mod state_feedback;
mod state_ops;
mod ui;
mod view;

#[cfg(test)]
mod tests;

use crate::backend::BridgeHandle;
use clipstack_core::models::{Clip, Pastebook, PastebookSummary};
use eframe::egui;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [860.0, 560.0];
const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
// Idle repaint cadence; bridge events are drained at every repaint.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Canvas window state. One instance per window process; all mutation goes
/// through methods on this type rather than ambient globals.
pub(crate) struct CanvasApp {
    bridge: BridgeHandle,
    clips: Vec<Clip>,
    /// Generation of the most recent clip load request. Replies carrying an
    /// older generation were superseded and are dropped.
    clips_generation: u64,
    selection: HashSet<String>,
    expanded: HashSet<String>,
    search_query: String,
    pastebooks: Vec<PastebookSummary>,
    active_pastebook: Option<Pastebook>,
    edit_draft: Option<EditDraft>,
    dragging_clip: Option<String>,
    drag_dirty: bool,
    merge_in_flight: bool,
    sort_in_flight: bool,
    clear_in_flight: bool,
    chat_open: bool,
    chat_input: String,
    chat_history: Vec<ChatEntry>,
    chat_in_flight: bool,
    settings_open: bool,
    api_key_input: String,
    models: Vec<String>,
    new_pastebook_open: bool,
    new_pastebook_name: String,
    rename_draft: Option<RenameDraft>,
    focus_request: Option<String>,
    clipboard_outgoing: Option<String>,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    collapse_threshold: usize,
    sync_stats: SyncCounters,
}

/// In-progress content edit. The cache is only touched once the backend
/// confirms the save (call-then-apply).
struct EditDraft {
    id: String,
    text: String,
    in_flight: bool,
}

struct RenameDraft {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatRole {
    User,
    Assistant,
}

struct ChatEntry {
    role: ChatRole,
    text: String,
}

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

struct ToastMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Default, Debug, Clone)]
struct SyncCounters {
    loads_sent: u64,
    loads_applied: u64,
    stale_loads_dropped: u64,
}

impl CanvasApp {
    /// Construct the canvas state and kick off the initial clip and
    /// pastebook loads so the window has data on first paint.
    pub(crate) fn new(bridge: BridgeHandle, collapse_threshold: usize) -> Self {
        let mut app = Self {
            bridge,
            clips: Vec::new(),
            clips_generation: 0,
            selection: HashSet::new(),
            expanded: HashSet::new(),
            search_query: String::new(),
            pastebooks: Vec::new(),
            active_pastebook: None,
            edit_draft: None,
            dragging_clip: None,
            drag_dirty: false,
            merge_in_flight: false,
            sort_in_flight: false,
            clear_in_flight: false,
            chat_open: false,
            chat_input: String::new(),
            chat_history: Vec::new(),
            chat_in_flight: false,
            settings_open: false,
            api_key_input: String::new(),
            models: Vec::new(),
            new_pastebook_open: false,
            new_pastebook_name: String::new(),
            rename_draft: None,
            focus_request: None,
            clipboard_outgoing: None,
            status: None,
            toasts: VecDeque::with_capacity(TOAST_LIMIT),
            collapse_threshold,
            sync_stats: SyncCounters::default(),
        };
        app.request_clips();
        app.request_pastebooks();
        app
    }
}

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.expire_feedback(now);

        while let Ok(event) = self.bridge.evt_rx.try_recv() {
            self.apply_event(event);
        }

        if let Some(text) = self.clipboard_outgoing.take() {
            ctx.send_cmd(egui::OutputCommand::CopyText(text));
        }

        self.render_top_bar(ctx);
        self.render_selection_bar(ctx);
        self.render_status_bar(ctx);
        self.render_clip_list(ctx);
        self.render_settings_window(ctx);
        self.render_chat_window(ctx);
        self.render_pastebook_windows(ctx);
        self.render_toasts(ctx);

        let mut repaint_after = EVENT_POLL_INTERVAL;
        if let Some(status) = &self.status {
            repaint_after = repaint_after.min(status.expires_at.saturating_duration_since(now));
        }
        if let Some(toast) = self.toasts.front() {
            repaint_after = repaint_after.min(toast.expires_at.saturating_duration_since(now));
        }
        ctx.request_repaint_after(repaint_after);
    }
}
