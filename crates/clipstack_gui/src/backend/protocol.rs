//! Protocol types for the bridge worker.
//!
//! `BridgeCmd` is what the UI thread asks for; `BridgeEvent` is what comes
//! back, covering both invocation results and backend pushes. The worker is
//! the only place that speaks the wire protocol.

use clipstack_core::models::{Clip, Pastebook, PastebookSummary};
use clipstack_core::proto::BackendErrorKind;

/// Commands issued by the UI thread for the bridge worker to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCmd {
    /// Fetch the full clip list of the active pastebook. The generation is
    /// echoed back so a superseded load can be discarded by the caller.
    LoadClips { generation: u64 },
    /// Delete a single clip.
    DeleteClip { id: String },
    /// Delete several clips, one invocation per id; partial failure is
    /// reported, not collapsed into an all-or-nothing result.
    DeleteClips { ids: Vec<String> },
    /// Persist edited content for a clip. The cache applies the new content
    /// only after the confirming event (call-then-apply).
    UpdateClip { id: String, content: String },
    /// Persist a new full ordering of the active pastebook.
    ReorderClips { ids: Vec<String> },
    /// Merge two or more clips into a backend-shaped result.
    MergeClips { ids: Vec<String> },
    /// Ask the backend to place the joined clip contents on the clipboard.
    CopyAllToClipboard,
    /// Remove every clip in the active pastebook.
    ClearAllClips,
    /// Fetch the pastebook list and the active pointer in one round.
    LoadPastebooks,
    SwitchPastebook { id: String },
    CreatePastebook { name: String },
    DeletePastebook { id: String },
    RenamePastebook { id: String, name: String },
    /// AI-assisted reordering; the result shape is backend-determined, the
    /// caller reloads on success.
    MagicSort,
    ChatSubmit { prompt: String },
    SetApiKey { api_key: String },
    LoadModels,
    /// Relay a focus request to the other windows.
    EmitFocusClip { id: String },
}

/// Events produced by the bridge worker and polled by the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// Full clip list for the echoed load generation.
    ClipsLoaded { generation: u64, clips: Vec<Clip> },
    /// Backend push: a new capture, carrying the full record.
    ClipCaptured { clip: Clip },
    /// Backend push: the clip list changed out of band; reload.
    ClipsUpdated,
    /// Push from another window asking to focus a clip.
    FocusClip { id: String },
    /// Confirmed content update.
    ClipSaved { id: String, content: String },
    /// Outcome of a (possibly multi-id) delete. `failed` ids are still alive
    /// backend-side and must stay in the cache.
    ClipsDeleted {
        deleted: Vec<String>,
        failed: Vec<String>,
    },
    /// The submitted ordering was accepted.
    ReorderApplied,
    /// Merge finished; the merged record's identity and position are
    /// backend-determined, so callers reload instead of patching.
    MergeCompleted { clip: Option<Clip> },
    AllCopied,
    AllCleared,
    /// Pastebook list plus active pointer, as one consistent snapshot.
    PastebooksLoaded {
        books: Vec<PastebookSummary>,
        active: Option<Pastebook>,
    },
    PastebookSwitched { id: String, switched: bool },
    PastebookCreated { pastebook: Pastebook },
    PastebookDeleted { id: String, deleted: bool },
    PastebookRenamed { id: String, renamed: bool },
    /// Magic sort finished backend-side; reload to observe the new order.
    SortApplied,
    ChatReply { reply: String },
    ApiKeySaved,
    ModelsLoaded { models: Vec<String> },
    /// An invocation or the connection failed. `source` scopes which
    /// in-flight state the UI may reset; unrelated pending work is left
    /// untouched.
    Error {
        source: BridgeErrorSource,
        kind: BackendErrorKind,
        message: String,
    },
}

/// Which request class a bridge error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeErrorSource {
    Load,
    SaveContent,
    Reorder,
    Merge,
    Pastebook,
    Sort,
    Chat,
    Settings,
    Connection,
    Other,
}
