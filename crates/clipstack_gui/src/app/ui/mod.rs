//! egui panels for the canvas surface.

mod clip_list;
mod modals;
mod status_bar;
mod toasts;
mod top_bar;
