//! State transitions for bridge events, selection, editing and pastebooks.
//!
//! Every mutation follows the same contract: optimistic changes are limited
//! to ordering (reorder-by-drag); everything else is call-then-apply, and the
//! backend stays the source of truth through full reloads whenever a result
//! shape is not locally reconstructable (merge, magic sort, rejected
//! reorder).

use super::{CanvasApp, ChatEntry, ChatRole, EditDraft, RenameDraft};
use crate::backend::{BridgeCmd, BridgeErrorSource, BridgeEvent};
use clipstack_core::constants::MERGE_MIN_CLIPS;
use clipstack_core::proto::BackendErrorKind;
use clipstack_core::text::normalize_nonempty;
use tracing::{debug, warn};

impl CanvasApp {
    /// Request a full clip reload for the active pastebook.
    ///
    /// Bumps the load generation so any response to an earlier request is
    /// recognizably stale. On dispatch failure the cache keeps its previous
    /// (possibly stale) contents.
    pub(super) fn request_clips(&mut self) {
        self.clips_generation += 1;
        let generation = self.clips_generation;
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::LoadClips { generation })
            .is_err()
        {
            self.set_status("Load failed: backend unavailable.");
            return;
        }
        self.sync_stats.loads_sent += 1;
        debug!(
            generation,
            loads_sent = self.sync_stats.loads_sent,
            "clip load dispatched"
        );
    }

    pub(super) fn request_pastebooks(&mut self) {
        if self.bridge.cmd_tx.send(BridgeCmd::LoadPastebooks).is_err() {
            self.set_status("Pastebook load failed: backend unavailable.");
        }
    }

    /// Apply one bridge event to the window state. This is the only place
    /// backend truth enters the cache.
    pub(super) fn apply_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::ClipsLoaded { generation, clips } => {
                if generation != self.clips_generation {
                    // A newer load is in flight; this response lost the race.
                    self.sync_stats.stale_loads_dropped += 1;
                    debug!(
                        generation,
                        current = self.clips_generation,
                        "dropping stale clip load"
                    );
                    return;
                }
                self.clips = clips;
                self.selection.clear();
                self.prune_expanded();
                let draft_gone = self
                    .edit_draft
                    .as_ref()
                    .map(|draft| !self.clips.iter().any(|clip| clip.id == draft.id))
                    .unwrap_or(false);
                if draft_gone {
                    self.edit_draft = None;
                }
                self.sync_stats.loads_applied += 1;
                debug!(
                    generation,
                    loads_applied = self.sync_stats.loads_applied,
                    "clip load applied"
                );
            }
            BridgeEvent::ClipCaptured { clip } => {
                // Push-based update; ids are unique, so a rebroadcast of an
                // already-cached capture is a no-op.
                if self.clips.iter().any(|cached| cached.id == clip.id) {
                    return;
                }
                self.clips.insert(0, clip);
            }
            BridgeEvent::ClipsUpdated => {
                // Out-of-band change (another window); a full reload is the
                // reconciliation strategy, not an incremental patch.
                self.request_clips();
            }
            BridgeEvent::FocusClip { id } => {
                self.expanded.insert(id.clone());
                self.focus_request = Some(id);
            }
            BridgeEvent::ClipSaved { id, content } => {
                if let Some(clip) = self.clips.iter_mut().find(|clip| clip.id == id) {
                    clip.content = content;
                }
                if self
                    .edit_draft
                    .as_ref()
                    .map(|draft| draft.id == id)
                    .unwrap_or(false)
                {
                    self.edit_draft = None;
                }
                self.set_status("Clip saved.");
            }
            BridgeEvent::ClipsDeleted { deleted, failed } => {
                self.clips.retain(|clip| !deleted.contains(&clip.id));
                self.prune_selection();
                self.prune_expanded();
                if failed.is_empty() {
                    self.set_status(format!("Deleted {} clip(s).", deleted.len()));
                } else {
                    // Failed ids are still alive backend-side and stay cached.
                    self.set_status(format!(
                        "Delete failed for {} of {} clip(s).",
                        failed.len(),
                        deleted.len() + failed.len()
                    ));
                }
            }
            BridgeEvent::ReorderApplied => {
                debug!("reorder confirmed");
            }
            BridgeEvent::MergeCompleted { .. } => {
                self.merge_in_flight = false;
                self.set_status("Clips merged.");
                // Merged identity and position are backend-determined.
                self.request_clips();
            }
            BridgeEvent::AllCopied => {
                self.set_status("Copied all clips to the clipboard.");
            }
            BridgeEvent::AllCleared => {
                self.clear_in_flight = false;
                self.clips.clear();
                self.selection.clear();
                self.expanded.clear();
                self.edit_draft = None;
                self.set_status("All clips cleared.");
            }
            BridgeEvent::PastebooksLoaded { books, active } => {
                // The active pointer only moves on a successful reload; a
                // failed switch never leaves a half-applied pointer.
                self.pastebooks = books;
                self.active_pastebook = active;
            }
            BridgeEvent::PastebookSwitched { switched, .. } => {
                if switched {
                    // Two independent reloads; they may interleave with
                    // pushes and complete in either order.
                    self.request_pastebooks();
                    self.request_clips();
                } else {
                    self.set_status("Switch failed: pastebook not found.");
                }
            }
            BridgeEvent::PastebookCreated { pastebook } => {
                self.set_status(format!("Created pastebook \"{}\".", pastebook.name));
                // Creation switches the active pastebook backend-side.
                self.request_pastebooks();
                self.request_clips();
            }
            BridgeEvent::PastebookDeleted { deleted, .. } => {
                if deleted {
                    self.set_status("Pastebook deleted.");
                    self.request_pastebooks();
                    self.request_clips();
                } else {
                    self.set_status("Delete failed: the last pastebook cannot be removed.");
                }
            }
            BridgeEvent::PastebookRenamed { renamed, .. } => {
                if renamed {
                    self.set_status("Pastebook renamed.");
                    self.request_pastebooks();
                } else {
                    self.set_status("Rename failed: pastebook not found.");
                }
            }
            BridgeEvent::SortApplied => {
                self.sort_in_flight = false;
                self.set_status("Magic sort applied.");
                self.request_clips();
            }
            BridgeEvent::ChatReply { reply } => {
                self.chat_in_flight = false;
                self.chat_history.push(ChatEntry {
                    role: ChatRole::Assistant,
                    text: reply,
                });
            }
            BridgeEvent::ApiKeySaved => {
                self.set_status("API key saved.");
                self.request_models();
            }
            BridgeEvent::ModelsLoaded { models } => {
                self.models = models;
            }
            BridgeEvent::Error {
                source,
                kind,
                message,
            } => self.apply_error(source, kind, message),
        }
    }

    fn apply_error(&mut self, source: BridgeErrorSource, kind: BackendErrorKind, message: String) {
        warn!("bridge error ({:?}): {}", source, message);
        if kind == BackendErrorKind::InvalidApiKey {
            // Structured kind instead of message sniffing: the settings
            // dialog opens as the secondary action.
            self.settings_open = true;
        }
        match source {
            // The cache keeps its last-known-good contents on a failed load.
            BridgeErrorSource::Load => {}
            BridgeErrorSource::SaveContent => {
                if let Some(draft) = self.edit_draft.as_mut() {
                    draft.in_flight = false;
                }
            }
            BridgeErrorSource::Reorder => {
                // Partial orderings are not locally reconstructable; reload.
                self.request_clips();
            }
            BridgeErrorSource::Merge => self.merge_in_flight = false,
            BridgeErrorSource::Sort => self.sort_in_flight = false,
            BridgeErrorSource::Chat => self.chat_in_flight = false,
            BridgeErrorSource::Connection => {
                self.merge_in_flight = false;
                self.sort_in_flight = false;
                self.chat_in_flight = false;
                self.clear_in_flight = false;
                if let Some(draft) = self.edit_draft.as_mut() {
                    draft.in_flight = false;
                }
            }
            BridgeErrorSource::Pastebook
            | BridgeErrorSource::Settings
            | BridgeErrorSource::Other => {}
        }
        let text = match source {
            BridgeErrorSource::Load => format!("Load failed: {}", message),
            BridgeErrorSource::SaveContent => format!("Save failed: {}", message),
            BridgeErrorSource::Reorder => format!("Reorder failed: {}", message),
            BridgeErrorSource::Merge => format!("Merge failed: {}", message),
            BridgeErrorSource::Pastebook => format!("Pastebook operation failed: {}", message),
            BridgeErrorSource::Sort => format!("Magic sort failed: {}", message),
            BridgeErrorSource::Chat => format!("Chat failed: {}", message),
            BridgeErrorSource::Settings => format!("Settings update failed: {}", message),
            BridgeErrorSource::Connection | BridgeErrorSource::Other => message,
        };
        self.set_status(text);
    }

    // ---- selection -------------------------------------------------------

    pub(super) fn toggle_select(&mut self, id: &str, checked: bool) {
        if checked {
            if self.clips.iter().any(|clip| clip.id == id) {
                self.selection.insert(id.to_string());
            }
        } else {
            self.selection.remove(id);
        }
    }

    /// Select every clip visible under the current search filter.
    pub(super) fn select_all(&mut self) {
        self.selection = self.visible_ids().into_iter().collect();
    }

    pub(super) fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Re-establish the invariant that the selection is a subset of cache
    /// membership.
    fn prune_selection(&mut self) {
        let clips = &self.clips;
        self.selection
            .retain(|id| clips.iter().any(|clip| &clip.id == id));
    }

    fn prune_expanded(&mut self) {
        let clips = &self.clips;
        self.expanded
            .retain(|id| clips.iter().any(|clip| &clip.id == id));
    }

    /// Selected ids in cache order, for deterministic bulk operations.
    pub(super) fn selected_ids_in_order(&self) -> Vec<String> {
        self.clips
            .iter()
            .filter(|clip| self.selection.contains(&clip.id))
            .map(|clip| clip.id.clone())
            .collect()
    }

    // ---- editing ---------------------------------------------------------

    pub(super) fn begin_edit(&mut self, id: &str) {
        let Some(clip) = self.clips.iter().find(|clip| clip.id == id) else {
            return;
        };
        self.edit_draft = Some(EditDraft {
            id: clip.id.clone(),
            text: clip.content.clone(),
            in_flight: false,
        });
    }

    pub(super) fn cancel_edit(&mut self) {
        self.edit_draft = None;
    }

    /// Send the edited content for confirmation. The cache stays untouched
    /// until the backend acknowledges (call-then-apply), so an unsaved edit
    /// is never rendered as saved.
    pub(super) fn commit_edit(&mut self) {
        let Some(draft) = self.edit_draft.as_ref() else {
            return;
        };
        if draft.in_flight {
            return;
        }
        if normalize_nonempty(&draft.text).is_none() {
            // Known-invalid input never reaches the backend.
            self.set_status("Clip content cannot be empty.");
            return;
        }
        let id = draft.id.clone();
        let content = draft.text.clone();
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::UpdateClip { id, content })
            .is_err()
        {
            self.set_status("Save failed: backend unavailable.");
            return;
        }
        if let Some(draft) = self.edit_draft.as_mut() {
            draft.in_flight = true;
        }
    }

    // ---- deletion --------------------------------------------------------

    pub(super) fn delete_clip(&mut self, id: &str) {
        self.delete_ids(vec![id.to_string()]);
    }

    pub(super) fn delete_selected(&mut self) {
        let ids = self.selected_ids_in_order();
        if ids.is_empty() {
            return;
        }
        self.delete_ids(ids);
    }

    fn delete_ids(&mut self, ids: Vec<String>) {
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::DeleteClips { ids })
            .is_err()
        {
            self.set_status("Delete failed: backend unavailable.");
        }
    }

    // ---- ordering --------------------------------------------------------

    /// Move a clip to `target_index` in the cache, optimistically. The new
    /// order is confirmed with the backend when the drag ends.
    pub(super) fn move_clip_local(&mut self, id: &str, target_index: usize) {
        let Some(current) = self.clips.iter().position(|clip| clip.id == id) else {
            return;
        };
        let target = target_index.min(self.clips.len().saturating_sub(1));
        if current == target {
            return;
        }
        let clip = self.clips.remove(current);
        self.clips.insert(target, clip);
        self.drag_dirty = true;
    }

    /// Submit the current cache order. On rejection the list is reloaded
    /// from the backend rather than undone locally.
    pub(super) fn confirm_reorder(&mut self) {
        let ids: Vec<String> = self.clips.iter().map(|clip| clip.id.clone()).collect();
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::ReorderClips { ids })
            .is_err()
        {
            self.set_status("Reorder failed: backend unavailable.");
            self.request_clips();
        }
    }

    // ---- merge / bulk ----------------------------------------------------

    /// Merge the selected clips. A no-op below the two-clip minimum: no
    /// invocation is issued.
    pub(super) fn merge_selected(&mut self) {
        let ids = self.selected_ids_in_order();
        if ids.len() < MERGE_MIN_CLIPS || self.merge_in_flight {
            return;
        }
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::MergeClips { ids })
            .is_err()
        {
            self.set_status("Merge failed: backend unavailable.");
            return;
        }
        self.merge_in_flight = true;
    }

    pub(super) fn copy_clip(&mut self, id: &str) {
        let Some(clip) = self.clips.iter().find(|clip| clip.id == id) else {
            return;
        };
        // Local copy goes straight to the host clipboard, not the backend.
        self.clipboard_outgoing = Some(clip.content.clone());
        self.set_status("Clip copied.");
    }

    pub(super) fn copy_all(&mut self) {
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::CopyAllToClipboard)
            .is_err()
        {
            self.set_status("Copy failed: backend unavailable.");
        }
    }

    pub(super) fn clear_all(&mut self) {
        if self.clear_in_flight || self.clips.is_empty() {
            return;
        }
        if self.bridge.cmd_tx.send(BridgeCmd::ClearAllClips).is_err() {
            self.set_status("Clear failed: backend unavailable.");
            return;
        }
        self.clear_in_flight = true;
    }

    // ---- pastebooks ------------------------------------------------------

    pub(super) fn switch_pastebook(&mut self, id: String) {
        if self
            .active_pastebook
            .as_ref()
            .map(|active| active.id == id)
            .unwrap_or(false)
        {
            return;
        }
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::SwitchPastebook { id })
            .is_err()
        {
            self.set_status("Switch failed: backend unavailable.");
        }
    }

    pub(super) fn create_pastebook(&mut self) {
        let Some(name) = normalize_nonempty(&self.new_pastebook_name) else {
            self.set_status("Pastebook name cannot be empty.");
            return;
        };
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::CreatePastebook { name })
            .is_err()
        {
            self.set_status("Create failed: backend unavailable.");
            return;
        }
        self.new_pastebook_open = false;
        self.new_pastebook_name.clear();
    }

    pub(super) fn delete_active_pastebook(&mut self) {
        let Some(active) = self.active_pastebook.as_ref() else {
            return;
        };
        let id = active.id.clone();
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::DeletePastebook { id })
            .is_err()
        {
            self.set_status("Delete failed: backend unavailable.");
        }
    }

    pub(super) fn begin_rename_active_pastebook(&mut self) {
        let Some(active) = self.active_pastebook.as_ref() else {
            return;
        };
        self.rename_draft = Some(RenameDraft {
            id: active.id.clone(),
            name: active.name.clone(),
        });
    }

    pub(super) fn commit_rename(&mut self) {
        let Some(draft) = self.rename_draft.as_ref() else {
            return;
        };
        let Some(name) = normalize_nonempty(&draft.name) else {
            self.set_status("Pastebook name cannot be empty.");
            return;
        };
        let id = draft.id.clone();
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::RenamePastebook { id, name })
            .is_err()
        {
            self.set_status("Rename failed: backend unavailable.");
            return;
        }
        self.rename_draft = None;
    }

    // ---- AI actions ------------------------------------------------------

    pub(super) fn magic_sort(&mut self) {
        if self.sort_in_flight || self.clips.len() < 2 {
            return;
        }
        if self.bridge.cmd_tx.send(BridgeCmd::MagicSort).is_err() {
            self.set_status("Magic sort failed: backend unavailable.");
            return;
        }
        self.sort_in_flight = true;
    }

    pub(super) fn submit_chat(&mut self) {
        if self.chat_in_flight {
            return;
        }
        let Some(prompt) = normalize_nonempty(&self.chat_input) else {
            return;
        };
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::ChatSubmit {
                prompt: prompt.clone(),
            })
            .is_err()
        {
            self.set_status("Chat failed: backend unavailable.");
            return;
        }
        self.chat_history.push(ChatEntry {
            role: ChatRole::User,
            text: prompt,
        });
        self.chat_input.clear();
        self.chat_in_flight = true;
    }

    pub(super) fn save_api_key(&mut self) {
        let Some(api_key) = normalize_nonempty(&self.api_key_input) else {
            self.set_status("API key cannot be empty.");
            return;
        };
        if self
            .bridge
            .cmd_tx
            .send(BridgeCmd::SetApiKey { api_key })
            .is_err()
        {
            self.set_status("Settings update failed: backend unavailable.");
        }
    }

    pub(super) fn request_models(&mut self) {
        if self.bridge.cmd_tx.send(BridgeCmd::LoadModels).is_err() {
            self.set_status("Settings update failed: backend unavailable.");
        }
    }
}
