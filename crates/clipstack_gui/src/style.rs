//! Shared colors for both window surfaces.

use eframe::egui::Color32;

pub(crate) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(32, 33, 36);
pub(crate) const COLOR_BORDER: Color32 = Color32::from_rgb(60, 62, 66);
pub(crate) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(225, 226, 228);
pub(crate) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(150, 152, 156);
pub(crate) const COLOR_ACCENT: Color32 = Color32::from_rgb(110, 168, 254);
