//! Floating sidebar surface: a minimal capture feed.
//!
//! Shares the bridge protocol with the canvas but none of its state: the
//! sidebar keeps its own small cache, prepends pushed captures, and reloads
//! wholesale on `clips-updated`. Offered actions are copy, delete and
//! "open in canvas" (a relayed `focus-clip`).


use crate::backend::{BridgeCmd, BridgeEvent, BridgeHandle};
use crate::style::{COLOR_BG_SECONDARY, COLOR_BORDER, COLOR_TEXT_MUTED};
use clipstack_core::models::Clip;
use clipstack_core::text::{exceeds_chars, truncate_chars};
use eframe::egui::{self, RichText};
use std::time::{Duration, Instant};
use tracing::debug;

pub(crate) const SIDEBAR_WINDOW_SIZE: [f32; 2] = [360.0, 640.0];
const STATUS_TTL: Duration = Duration::from_secs(5);
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);
// One-line rows; anything longer is cut at a character boundary.
const ROW_PREVIEW_CHARS: usize = 80;

pub(crate) struct SidebarApp {
    bridge: BridgeHandle,
    clips: Vec<Clip>,
    clips_generation: u64,
    status: Option<(String, Instant)>,
    clipboard_outgoing: Option<String>,
}

impl SidebarApp {
    /// Construct the sidebar state and request the initial clip list.
    pub(crate) fn new(bridge: BridgeHandle) -> Self {
        let mut app = Self {
            bridge,
            clips: Vec::new(),
            clips_generation: 0,
            status: None,
            clipboard_outgoing: None,
        };
        app.request_clips();
        app
    }

    fn request_clips(&mut self) {
        self.clips_generation += 1;
        let generation = self.clips_generation;
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::LoadClips { generation })
            .is_err()
        {
            self.set_status("Load failed: backend unavailable.");
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some((text.into(), Instant::now() + STATUS_TTL));
    }

    fn apply_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::ClipsLoaded { generation, clips } => {
                if generation != self.clips_generation {
                    debug!(generation, "dropping stale sidebar clip load");
                    return;
                }
                self.clips = clips;
            }
            BridgeEvent::ClipCaptured { clip } => {
                if self.clips.iter().any(|cached| cached.id == clip.id) {
                    return;
                }
                self.clips.insert(0, clip);
            }
            BridgeEvent::ClipsUpdated => self.request_clips(),
            BridgeEvent::ClipsDeleted { deleted, failed } => {
                self.clips.retain(|clip| !deleted.contains(&clip.id));
                if !failed.is_empty() {
                    self.set_status("Delete failed.");
                }
            }
            BridgeEvent::Error { message, .. } => self.set_status(message),
            // Canvas-directed events carry nothing for this surface.
            _ => {}
        }
    }

    fn copy_clip(&mut self, id: &str) {
        let Some(clip) = self.clips.iter().find(|clip| clip.id == id) else {
            return;
        };
        self.clipboard_outgoing = Some(clip.content.clone());
        self.set_status("Clip copied.");
    }

    fn delete_clip(&mut self, id: &str) {
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::DeleteClip { id: id.to_string() })
            .is_err()
        {
            self.set_status("Delete failed: backend unavailable.");
        }
    }

    fn open_in_canvas(&mut self, id: &str) {
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::EmitFocusClip { id: id.to_string() })
            .is_err()
        {
            self.set_status("Open failed: backend unavailable.");
        }
    }
}

enum RowAction {
    Copy(String),
    Open(String),
    Delete(String),
}

impl eframe::App for SidebarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some((_, expires_at)) = &self.status {
            if now >= *expires_at {
                self.status = None;
            }
        }

        while let Ok(event) = self.bridge.evt_rx.try_recv() {
            self.apply_event(event);
        }

        if let Some(text) = self.clipboard_outgoing.take() {
            ctx.send_cmd(egui::OutputCommand::CopyText(text));
        }

        egui::TopBottomPanel::bottom("sidebar_status").show(ctx, |ui| {
            match &self.status {
                Some((text, _)) => {
                    ui.label(text.clone());
                }
                None => {
                    ui.label(
                        RichText::new(format!("{} clips", self.clips.len()))
                            .color(COLOR_TEXT_MUTED),
                    );
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.clips.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No clips yet.").color(COLOR_TEXT_MUTED));
                });
                return;
            }
            let mut actions: Vec<RowAction> = Vec::new();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for clip in &self.clips {
                        egui::Frame::group(ui.style())
                            .fill(COLOR_BG_SECONDARY)
                            .stroke(egui::Stroke::new(1.0, COLOR_BORDER))
                            .show(ui, |ui| {
                                ui.label(
                                    RichText::new(&clip.metadata.source_app)
                                        .small()
                                        .color(COLOR_TEXT_MUTED),
                                );
                                ui.label(row_preview(&clip.content));
                                ui.horizontal(|ui| {
                                    if ui.small_button("Copy").clicked() {
                                        actions.push(RowAction::Copy(clip.id.clone()));
                                    }
                                    if ui.small_button("Open").clicked() {
                                        actions.push(RowAction::Open(clip.id.clone()));
                                    }
                                    if ui.small_button("Delete").clicked() {
                                        actions.push(RowAction::Delete(clip.id.clone()));
                                    }
                                });
                            });
                        ui.add_space(4.0);
                    }
                });
            for action in actions {
                match action {
                    RowAction::Copy(id) => self.copy_clip(&id),
                    RowAction::Open(id) => self.open_in_canvas(&id),
                    RowAction::Delete(id) => self.delete_clip(&id),
                }
            }
        });

        ctx.request_repaint_after(EVENT_POLL_INTERVAL);
    }
}

/// Single-line row preview, first line only, cut at a character boundary.
fn row_preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.len() == content.len() && !exceeds_chars(first_line, ROW_PREVIEW_CHARS) {
        return first_line.to_string();
    }
    format!("{}…", truncate_chars(first_line, ROW_PREVIEW_CHARS))
}
