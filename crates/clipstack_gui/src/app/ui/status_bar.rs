//! Bottom status bar: transient status text plus cache/pastebook summary.

use super::super::CanvasApp;
use crate::style::COLOR_TEXT_MUTED;
use eframe::egui::{self, RichText};

impl CanvasApp {
    pub(in crate::app) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(status) => {
                        ui.label(status.text.clone());
                    }
                    None => {
                        ui.label(
                            RichText::new(self.clip_count_label()).color(COLOR_TEXT_MUTED),
                        );
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(active) = &self.active_pastebook {
                        ui.label(RichText::new(active.name.clone()).color(COLOR_TEXT_MUTED));
                    }
                });
            });
        });
    }
}
