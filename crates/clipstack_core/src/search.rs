//! Client-side search filtering over the cached clip list.
//!
//! Search never reaches the backend: it is a projection of the per-window
//! cache, matched case-insensitively against content, source application and
//! window title.

use crate::models::Clip;

/// Check whether a clip matches a search query.
///
/// # Returns
/// `true` for whitespace-only queries (no filter active) or any
/// case-insensitive substring hit on content, source app or window title.
pub fn clip_matches(clip: &Clip, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    clip.content.to_lowercase().contains(&needle)
        || clip.metadata.source_app.to_lowercase().contains(&needle)
        || clip.metadata.window_title.to_lowercase().contains(&needle)
}

/// Project the cache to the ids visible under `query`, order preserved.
pub fn visible_ids(clips: &[Clip], query: &str) -> Vec<String> {
    clips
        .iter()
        .filter(|clip| clip_matches(clip, query))
        .map(|clip| clip.id.clone())
        .collect()
}
