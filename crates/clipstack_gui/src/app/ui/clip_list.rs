//! Central clip list: cards, inline editing, manual drag-reorder.
//!
//! Card interactions are collected into [`ClipAction`] values during the
//! render pass and applied afterwards, so the cache is never mutated while
//! it is being iterated.

use super::super::view::{collapsed_preview, format_timestamp, needs_collapse};
use super::super::CanvasApp;
use crate::style::{COLOR_BG_SECONDARY, COLOR_BORDER, COLOR_TEXT_MUTED};
use eframe::egui::{self, RichText};

enum ClipAction {
    ToggleSelect(String, bool),
    ToggleExpand(String),
    Copy(String),
    BeginEdit(String),
    CommitEdit,
    CancelEdit,
    Delete(String),
    DragStart(String),
}

impl CanvasApp {
    pub(in crate::app) fn render_clip_list(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let ids = self.visible_ids();
            if ids.is_empty() {
                let message = self.empty_state_message();
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(message).color(COLOR_TEXT_MUTED));
                });
                return;
            }

            let reorder_allowed = self.reorder_allowed();
            let focus = self.focus_request.clone();
            let mut focus_seen = false;
            let mut actions: Vec<ClipAction> = Vec::new();
            let mut drop_target: Option<usize> = None;
            let pointer_pos = ctx.input(|input| input.pointer.interact_pos());

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, id) in ids.iter().enumerate() {
                        let Some(clip) = self.clips.iter().find(|clip| &clip.id == id) else {
                            continue;
                        };
                        let selected = self.selection.contains(id);
                        let expanded = self.expanded.contains(id);
                        let editing_this = self
                            .edit_draft
                            .as_ref()
                            .map(|draft| draft.id == *id)
                            .unwrap_or(false);

                        let card = egui::Frame::group(ui.style())
                            .fill(COLOR_BG_SECONDARY)
                            .stroke(egui::Stroke::new(1.0, COLOR_BORDER))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    let mut checked = selected;
                                    if ui.checkbox(&mut checked, "").changed() {
                                        actions.push(ClipAction::ToggleSelect(
                                            id.clone(),
                                            checked,
                                        ));
                                    }
                                    ui.label(RichText::new(&clip.metadata.source_app).strong());
                                    ui.label(
                                        RichText::new(&clip.metadata.window_title)
                                            .color(COLOR_TEXT_MUTED),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            ui.label(
                                                RichText::new(format_timestamp(
                                                    &clip.metadata.timestamp,
                                                ))
                                                .small()
                                                .color(COLOR_TEXT_MUTED),
                                            );
                                            if reorder_allowed {
                                                let handle = ui.add(
                                                    egui::Label::new(
                                                        RichText::new("⠿")
                                                            .color(COLOR_TEXT_MUTED),
                                                    )
                                                    .sense(egui::Sense::drag()),
                                                );
                                                if handle.drag_started() {
                                                    actions.push(ClipAction::DragStart(
                                                        id.clone(),
                                                    ));
                                                }
                                            }
                                        },
                                    );
                                });

                                if editing_this {
                                    if let Some(draft) = self.edit_draft.as_mut() {
                                        ui.add(
                                            egui::TextEdit::multiline(&mut draft.text)
                                                .desired_width(f32::INFINITY)
                                                .desired_rows(4),
                                        );
                                        let saving = draft.in_flight;
                                        ui.horizontal(|ui| {
                                            let save_label =
                                                if saving { "Saving…" } else { "Save" };
                                            if ui
                                                .add_enabled(
                                                    !saving,
                                                    egui::Button::new(save_label),
                                                )
                                                .clicked()
                                            {
                                                actions.push(ClipAction::CommitEdit);
                                            }
                                            if ui
                                                .add_enabled(
                                                    !saving,
                                                    egui::Button::new("Cancel"),
                                                )
                                                .clicked()
                                            {
                                                actions.push(ClipAction::CancelEdit);
                                            }
                                        });
                                    }
                                } else {
                                    match collapsed_preview(
                                        &clip.content,
                                        self.collapse_threshold,
                                        expanded,
                                    ) {
                                        Some(preview) => {
                                            ui.label(preview);
                                        }
                                        None => {
                                            ui.label(&clip.content);
                                        }
                                    }
                                    if needs_collapse(&clip.content, self.collapse_threshold) {
                                        let toggle_label = if expanded {
                                            "Show less"
                                        } else {
                                            "Show more"
                                        };
                                        if ui.link(toggle_label).clicked() {
                                            actions.push(ClipAction::ToggleExpand(id.clone()));
                                        }
                                    }
                                    ui.horizontal(|ui| {
                                        if ui.small_button("Copy").clicked() {
                                            actions.push(ClipAction::Copy(id.clone()));
                                        }
                                        if ui.small_button("Edit").clicked() {
                                            actions.push(ClipAction::BeginEdit(id.clone()));
                                        }
                                        if ui.small_button("Delete").clicked() {
                                            actions.push(ClipAction::Delete(id.clone()));
                                        }
                                    });
                                }
                            });

                        if focus.as_deref() == Some(id.as_str()) {
                            card.response.scroll_to_me(Some(egui::Align::Center));
                            focus_seen = true;
                        }
                        if self.dragging_clip.is_some() {
                            if let Some(pos) = pointer_pos {
                                if card.response.rect.contains(pos) {
                                    drop_target = Some(index);
                                }
                            }
                        }
                        ui.add_space(6.0);
                    }
                });

            if focus_seen {
                self.focus_request = None;
            }
            if let (Some(drag_id), Some(target)) = (self.dragging_clip.clone(), drop_target) {
                if drag_id != ids[target] {
                    self.move_clip_local(&drag_id, target);
                }
            }
            let released = ctx.input(|input| input.pointer.any_released());
            if released && self.dragging_clip.take().is_some() && self.drag_dirty {
                self.drag_dirty = false;
                self.confirm_reorder();
            }
            for action in actions {
                self.apply_clip_action(action);
            }
        });
    }

    fn apply_clip_action(&mut self, action: ClipAction) {
        match action {
            ClipAction::ToggleSelect(id, checked) => self.toggle_select(&id, checked),
            ClipAction::ToggleExpand(id) => {
                if !self.expanded.remove(&id) {
                    self.expanded.insert(id);
                }
            }
            ClipAction::Copy(id) => self.copy_clip(&id),
            ClipAction::BeginEdit(id) => self.begin_edit(&id),
            ClipAction::CommitEdit => self.commit_edit(),
            ClipAction::CancelEdit => self.cancel_edit(),
            ClipAction::Delete(id) => self.delete_clip(&id),
            ClipAction::DragStart(id) => self.dragging_clip = Some(id),
        }
    }
}
