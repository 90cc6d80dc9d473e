//! Pure view projections of the canvas state.

use super::CanvasApp;
use chrono::{DateTime, Local, Utc};
use clipstack_core::constants::MERGE_MIN_CLIPS;
use clipstack_core::search;
use clipstack_core::text::{exceeds_chars, truncate_chars};

impl CanvasApp {
    /// Ids visible under the current search query, cache order preserved.
    pub(super) fn visible_ids(&self) -> Vec<String> {
        search::visible_ids(&self.clips, &self.search_query)
    }

    pub(super) fn search_active(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Empty-state wording depends on whether a filter is hiding clips.
    pub(super) fn empty_state_message(&self) -> &'static str {
        if self.search_active() {
            "No clips match your search."
        } else {
            "No clips yet. Capture something to get started."
        }
    }

    pub(super) fn can_merge(&self) -> bool {
        self.selection.len() >= MERGE_MIN_CLIPS
    }

    pub(super) fn can_delete_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Drag-reorder submits the full cache order, so it is only offered when
    /// the whole cache is visible and no edit is in progress.
    pub(super) fn reorder_allowed(&self) -> bool {
        !self.search_active() && self.edit_draft.is_none() && self.clips.len() > 1
    }

    pub(super) fn clip_count_label(&self) -> String {
        match self.clips.len() {
            1 => "1 clip".to_string(),
            n => format!("{} clips", n),
        }
    }
}

/// Collapsed preview for long content.
///
/// # Returns
/// `Some(prefix + ellipsis)` when the content exceeds `threshold` characters
/// and is not expanded, otherwise `None` (render the full content).
pub(super) fn collapsed_preview(
    content: &str,
    threshold: usize,
    expanded: bool,
) -> Option<String> {
    if expanded || !exceeds_chars(content, threshold) {
        return None;
    }
    Some(format!("{}…", truncate_chars(content, threshold)))
}

/// Whether content is long enough to need an expand toggle at all.
pub(super) fn needs_collapse(content: &str, threshold: usize) -> bool {
    exceeds_chars(content, threshold)
}

/// Capture timestamp in the local timezone, short form.
pub(super) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %e, %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{collapsed_preview, needs_collapse};

    #[test]
    fn short_content_never_collapses() {
        assert_eq!(collapsed_preview("short", 10, false), None);
        assert!(!needs_collapse("short", 10));
    }

    #[test]
    fn long_content_collapses_until_expanded() {
        let content = "abcdefghij";
        let preview = collapsed_preview(content, 4, false).expect("collapsed");
        assert_eq!(preview, "abcd…");
        assert_eq!(collapsed_preview(content, 4, true), None);
        assert!(needs_collapse(content, 4));
    }

    #[test]
    fn collapse_threshold_counts_characters_not_bytes() {
        let content = "ééééé";
        assert!(!needs_collapse(content, 5));
        let preview = collapsed_preview(content, 3, false).expect("collapsed");
        assert_eq!(preview, "ééé…");
    }
}
