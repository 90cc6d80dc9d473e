//! Shared constants used across ClipStack crates.

/// Default TCP port where the backend's bridge endpoint listens.
pub const DEFAULT_BACKEND_PORT: u16 = 39217;

/// Default bridge address used when `CLIPSTACK_BACKEND_ADDR` is unset.
pub const DEFAULT_BACKEND_ADDR: &str = "127.0.0.1:39217";

/// Character count above which a clip card renders collapsed.
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 240;

/// Minimum number of selected clips required for a merge.
pub const MERGE_MIN_CLIPS: usize = 2;
