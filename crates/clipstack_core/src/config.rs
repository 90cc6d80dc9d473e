//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_BACKEND_ADDR, DEFAULT_COLLAPSE_THRESHOLD};
use serde::Deserialize;
use std::env;

/// Which window surface this process renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Full management window: search, selection, reorder, merge, AI actions.
    Canvas,
    /// Floating capture feed with open/copy/delete.
    Sidebar,
}

/// Runtime configuration for a ClipStack window process.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend_addr: String,
    pub surface: Surface,
    pub collapse_threshold: usize,
}

/// Parse a surface name as accepted by `CLIPSTACK_SURFACE`.
///
/// # Returns
/// `Some(Surface)` for `canvas`/`sidebar` (case-insensitive), otherwise `None`.
pub fn parse_surface(value: &str) -> Option<Surface> {
    match value.trim().to_ascii_lowercase().as_str() {
        "canvas" => Some(Surface::Canvas),
        "sidebar" => Some(Surface::Sidebar),
        _ => None,
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing:
    /// canvas surface, loopback backend address, default collapse threshold.
    pub fn from_env() -> Self {
        Self {
            backend_addr: env::var("CLIPSTACK_BACKEND_ADDR")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_ADDR.to_string()),
            surface: env::var("CLIPSTACK_SURFACE")
                .ok()
                .and_then(|value| parse_surface(&value))
                .unwrap_or(Surface::Canvas),
            collapse_threshold: env::var("CLIPSTACK_COLLAPSE_THRESHOLD")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_COLLAPSE_THRESHOLD),
        }
    }
}
