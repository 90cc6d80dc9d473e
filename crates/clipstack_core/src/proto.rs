//! Wire protocol between a window surface and the backend process.
//!
//! Frames travel as newline-delimited JSON over the bridge connection. The
//! invocation channel is `ClientFrame::Request` / `ServerFrame::Reply` paired
//! by request id; the event channel is `ServerFrame::Event`, pushed by the
//! backend with no request attached. A window can relay a window-to-window
//! event through `ClientFrame::Emit`, which the backend rebroadcasts to the
//! other listening windows.

use crate::models::Clip;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands accepted by the backend's invocation channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "args", rename_all = "snake_case")]
pub enum Command {
    GetClips,
    DeleteClip { id: String },
    UpdateClip { id: String, content: String },
    ReorderClips { ids: Vec<String> },
    MergeClips { ids: Vec<String> },
    CopyAllToClipboard,
    ClearAllClips,
    ListPastebooks,
    GetActivePastebook,
    SwitchPastebook { id: String },
    CreatePastebook { name: String },
    DeletePastebook { id: String },
    RenamePastebook { id: String, name: String },
    MagicSort,
    ChatSubmit { prompt: String },
    SetApiKey { api_key: String },
    GetModels,
}

/// Events pushed from the backend to every listening window.
///
/// Delivery is fire-and-forget: a window that is not connected misses the
/// push permanently and reconciles on its next full reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum PushEvent {
    /// A new clip was captured; carries the full record.
    ClipCaptured(Clip),
    /// The clip list changed out of band; listeners should reload.
    ClipsUpdated,
    /// Another window asks for this clip to be focused. Window-originated,
    /// rebroadcast by the backend.
    FocusClip { id: String },
}

/// Failure kinds carried across the invocation boundary.
///
/// A structured kind rather than free-form message sniffing, so callers can
/// react to specific failures (a missing API key opens the settings dialog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorKind {
    InvalidApiKey,
    NotFound,
    InvalidInput,
    Internal,
    Unavailable,
}

impl Default for BackendErrorKind {
    fn default() -> Self {
        Self::Internal
    }
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidApiKey => "invalid API key",
            Self::NotFound => "not found",
            Self::InvalidInput => "invalid input",
            Self::Internal => "internal error",
            Self::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// Error payload attached to a failed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    #[serde(default)]
    pub kind: BackendErrorKind,
    pub message: String,
}

/// Frames sent from a window to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Invocation request; answered by exactly one [`ServerFrame::Reply`]
    /// carrying the same id.
    Request { id: u64, command: Command },
    /// Window-to-window event relay.
    Emit { event: PushEvent },
}

/// Frames sent from the backend to a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Response to a request. Exactly one of `ok`/`err` is present; `ok` is
    /// the command-specific payload (`null` for commands without a result).
    Reply {
        id: u64,
        #[serde(default)]
        ok: Option<serde_json::Value>,
        #[serde(default)]
        err: Option<WireError>,
    },
    /// Unsolicited push on the event channel.
    Event { event: PushEvent },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClipMetadata;
    use chrono::Utc;

    fn sample_clip() -> Clip {
        Clip {
            id: "clip-1".to_string(),
            content: "hello".to_string(),
            metadata: ClipMetadata {
                timestamp: Utc::now(),
                source_app: "Firefox".to_string(),
                window_title: "Docs".to_string(),
            },
        }
    }

    #[test]
    fn commands_serialize_with_snake_case_tags() {
        let frame = ClientFrame::Request {
            id: 7,
            command: Command::SwitchPastebook {
                id: "pb-2".to_string(),
            },
        };
        let json = serde_json::to_value(&frame).expect("serialize frame");
        assert_eq!(json["type"], "request");
        assert_eq!(json["id"], 7);
        assert_eq!(json["command"]["cmd"], "switch_pastebook");
        assert_eq!(json["command"]["args"]["id"], "pb-2");

        let unit = serde_json::to_value(Command::GetClips).expect("serialize command");
        assert_eq!(unit["cmd"], "get_clips");
        assert!(unit.get("args").is_none());
    }

    #[test]
    fn push_events_use_kebab_case_names() {
        let captured = serde_json::to_value(PushEvent::ClipCaptured(sample_clip()))
            .expect("serialize push");
        assert_eq!(captured["event"], "clip-captured");
        assert_eq!(captured["payload"]["id"], "clip-1");
        assert_eq!(captured["payload"]["metadata"]["source_app"], "Firefox");

        let updated = serde_json::to_value(PushEvent::ClipsUpdated).expect("serialize push");
        assert_eq!(updated["event"], "clips-updated");

        let parsed: PushEvent =
            serde_json::from_str(r#"{"event":"focus-clip","payload":{"id":"clip-9"}}"#)
                .expect("parse focus-clip");
        assert_eq!(
            parsed,
            PushEvent::FocusClip {
                id: "clip-9".to_string()
            }
        );
    }

    #[test]
    fn replies_decode_ok_and_err_payloads() {
        let ok: ServerFrame = serde_json::from_str(r#"{"type":"reply","id":3,"ok":true}"#)
            .expect("parse ok reply");
        match ok {
            ServerFrame::Reply { id, ok, err } => {
                assert_eq!(id, 3);
                assert_eq!(ok, Some(serde_json::Value::Bool(true)));
                assert!(err.is_none());
            }
            other => panic!("unexpected frame: {:?}", other),
        }

        let err: ServerFrame = serde_json::from_str(
            r#"{"type":"reply","id":4,"err":{"kind":"invalid_api_key","message":"no key set"}}"#,
        )
        .expect("parse err reply");
        match err {
            ServerFrame::Reply { err: Some(err), .. } => {
                assert_eq!(err.kind, BackendErrorKind::InvalidApiKey);
                assert_eq!(err.message, "no key set");
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn error_kind_defaults_to_internal_when_missing() {
        let err: WireError =
            serde_json::from_str(r#"{"message":"boom"}"#).expect("parse bare error");
        assert_eq!(err.kind, BackendErrorKind::Internal);
    }
}
