//! Top bar: search, pastebook switcher, global actions, selection bar.

use super::super::CanvasApp;
use crate::style::COLOR_TEXT_MUTED;
use eframe::egui::{self, RichText};

impl CanvasApp {
    pub(in crate::app) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("ClipStack");
                ui.separator();
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text("Search clips")
                        .desired_width(220.0),
                );
                if self.search_active() && ui.small_button("✕").clicked() {
                    self.search_query.clear();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings_open = !self.settings_open;
                        if self.settings_open && self.models.is_empty() {
                            self.request_models();
                        }
                    }
                    if ui.button("Chat").clicked() {
                        self.chat_open = !self.chat_open;
                    }
                    let sort_label = if self.sort_in_flight {
                        "Sorting…"
                    } else {
                        "Magic sort"
                    };
                    if ui
                        .add_enabled(
                            !self.sort_in_flight && self.clips.len() > 1,
                            egui::Button::new(sort_label),
                        )
                        .clicked()
                    {
                        self.magic_sort();
                    }
                    if ui
                        .add_enabled(!self.clips.is_empty(), egui::Button::new("Copy all"))
                        .clicked()
                    {
                        self.copy_all();
                    }
                    if ui
                        .add_enabled(
                            !self.clear_in_flight && !self.clips.is_empty(),
                            egui::Button::new("Clear all"),
                        )
                        .clicked()
                    {
                        self.clear_all();
                    }
                });
            });
            ui.add_space(2.0);
            self.render_pastebook_row(ui);
            ui.add_space(4.0);
        });
    }

    fn render_pastebook_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Pastebook").color(COLOR_TEXT_MUTED));
            let active_label = self
                .active_pastebook
                .as_ref()
                .map(|active| active.name.clone())
                .unwrap_or_else(|| "—".to_string());
            let mut switch_to: Option<String> = None;
            egui::ComboBox::from_id_salt("pastebook_switcher")
                .selected_text(active_label)
                .show_ui(ui, |ui| {
                    for book in &self.pastebooks {
                        let is_active = self
                            .active_pastebook
                            .as_ref()
                            .map(|active| active.id == book.id)
                            .unwrap_or(false);
                        let label = format!("{} ({})", book.name, book.count);
                        if ui.selectable_label(is_active, label).clicked() && !is_active {
                            switch_to = Some(book.id.clone());
                        }
                    }
                });
            if let Some(id) = switch_to {
                self.switch_pastebook(id);
            }
            if ui.button("New").clicked() {
                self.new_pastebook_open = true;
            }
            let has_active = self.active_pastebook.is_some();
            if ui
                .add_enabled(has_active, egui::Button::new("Rename"))
                .clicked()
            {
                self.begin_rename_active_pastebook();
            }
            if ui
                .add_enabled(
                    has_active && self.pastebooks.len() > 1,
                    egui::Button::new("Delete"),
                )
                .clicked()
            {
                self.delete_active_pastebook();
            }
        });
    }

    pub(in crate::app) fn render_selection_bar(&mut self, ctx: &egui::Context) {
        if self.clips.is_empty() {
            return;
        }
        egui::TopBottomPanel::top("selection_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} selected", self.selection.len()));
                ui.separator();
                let merge_label = if self.merge_in_flight {
                    "Merging…"
                } else {
                    "Merge"
                };
                if ui
                    .add_enabled(
                        self.can_merge() && !self.merge_in_flight,
                        egui::Button::new(merge_label),
                    )
                    .clicked()
                {
                    self.merge_selected();
                }
                if ui
                    .add_enabled(
                        self.can_delete_selection(),
                        egui::Button::new("Delete selected"),
                    )
                    .clicked()
                {
                    self.delete_selected();
                }
                if ui.button("Select all").clicked() {
                    self.select_all();
                }
                if ui.button("Deselect").clicked() {
                    self.deselect_all();
                }
            });
        });
    }
}
