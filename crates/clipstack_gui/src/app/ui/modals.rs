//! Floating windows: settings, chat, pastebook create/rename.

use super::super::{CanvasApp, ChatRole};
use crate::style::{COLOR_ACCENT, COLOR_TEXT_MUTED};
use eframe::egui::{self, RichText};

impl CanvasApp {
    pub(in crate::app) fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }
        let mut open = self.settings_open;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Gemini API key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.api_key_input)
                        .password(true)
                        .hint_text("API key")
                        .desired_width(260.0),
                );
                ui.horizontal(|ui| {
                    if ui.button("Save key").clicked() {
                        self.save_api_key();
                    }
                    if ui.button("Refresh models").clicked() {
                        self.request_models();
                    }
                });
                if !self.models.is_empty() {
                    ui.separator();
                    ui.label(RichText::new("Available models").strong());
                    for model in &self.models {
                        ui.label(RichText::new(model).color(COLOR_TEXT_MUTED));
                    }
                }
            });
        self.settings_open = open;
    }

    pub(in crate::app) fn render_chat_window(&mut self, ctx: &egui::Context) {
        if !self.chat_open {
            return;
        }
        let mut open = self.chat_open;
        egui::Window::new("Chat")
            .open(&mut open)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if self.chat_history.is_empty() {
                            ui.label(
                                RichText::new("Ask anything about your clips.")
                                    .color(COLOR_TEXT_MUTED),
                            );
                        }
                        for entry in &self.chat_history {
                            match entry.role {
                                ChatRole::User => {
                                    ui.label(
                                        RichText::new(format!("You: {}", entry.text))
                                            .color(COLOR_ACCENT),
                                    );
                                }
                                ChatRole::Assistant => {
                                    ui.label(&entry.text);
                                }
                            }
                            ui.add_space(4.0);
                        }
                        if self.chat_in_flight {
                            ui.label(RichText::new("Thinking…").color(COLOR_TEXT_MUTED));
                        }
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut self.chat_input)
                            .hint_text("Ask about your clips")
                            .desired_width(240.0),
                    );
                    let submitted =
                        input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui
                        .add_enabled(!self.chat_in_flight, egui::Button::new("Send"))
                        .clicked()
                        || (submitted && !self.chat_in_flight)
                    {
                        self.submit_chat();
                    }
                });
            });
        self.chat_open = open;
    }

    pub(in crate::app) fn render_pastebook_windows(&mut self, ctx: &egui::Context) {
        if self.new_pastebook_open {
            let mut open = self.new_pastebook_open;
            egui::Window::new("New pastebook")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.new_pastebook_name)
                            .hint_text("Pastebook name"),
                    );
                    ui.horizontal(|ui| {
                        if ui.button("Create").clicked() {
                            self.create_pastebook();
                        }
                        if ui.button("Cancel").clicked() {
                            self.new_pastebook_open = false;
                            self.new_pastebook_name.clear();
                        }
                    });
                });
            // Respect both the titlebar close button and the Create/Cancel
            // handlers above.
            self.new_pastebook_open = self.new_pastebook_open && open;
        }

        if self.rename_draft.is_some() {
            let mut commit = false;
            let mut cancel = false;
            if let Some(draft) = self.rename_draft.as_mut() {
                egui::Window::new("Rename pastebook")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.name)
                                .hint_text("Pastebook name"),
                        );
                        ui.horizontal(|ui| {
                            if ui.button("Rename").clicked() {
                                commit = true;
                            }
                            if ui.button("Cancel").clicked() {
                                cancel = true;
                            }
                        });
                    });
            }
            if commit {
                self.commit_rename();
            } else if cancel {
                self.rename_draft = None;
            }
        }
    }
}
