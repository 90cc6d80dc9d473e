//! Bridge worker thread between the UI and the backend connection.
//!
//! The worker serves one `BridgeCmd` at a time. While a reply is pending it
//! keeps forwarding pushed events so captures reach the UI even with an
//! invocation in flight, and it drops any reply whose id does not match the
//! in-flight request (a stale answer from a superseded exchange).

use crate::backend::{BridgeCmd, BridgeErrorSource, BridgeEvent, RemoteConn};
use clipstack_core::proto::{BackendErrorKind, Command, PushEvent, ServerFrame};
use clipstack_core::AppError;
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::thread;
use tracing::{error, warn};

/// Handle for sending commands to, and receiving events from, the bridge
/// worker.
pub struct BridgeHandle {
    pub cmd_tx: Sender<BridgeCmd>,
    pub evt_rx: Receiver<BridgeEvent>,
}

impl BridgeHandle {
    /// Build a handle around raw channels. Test seam for headless surfaces
    /// that script both sides of the bridge.
    pub fn from_test_channels(
        cmd_tx: Sender<BridgeCmd>,
        evt_rx: Receiver<BridgeEvent>,
    ) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Spawn the bridge worker thread over an established backend connection.
///
/// All blocking I/O stays off the UI thread; the worker replies with
/// [`BridgeEvent`] values that are polled each frame.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_bridge(conn: RemoteConn) -> BridgeHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("clipstack-bridge".to_string())
        .spawn(move || run_worker(conn, cmd_rx, evt_tx))
        .expect("spawn bridge thread");

    BridgeHandle { cmd_tx, evt_rx }
}

fn run_worker(mut conn: RemoteConn, cmd_rx: Receiver<BridgeCmd>, evt_tx: Sender<BridgeEvent>) {
    let frames = conn.frames().clone();
    loop {
        select! {
            recv(cmd_rx) -> cmd => match cmd {
                Ok(cmd) => {
                    if !handle_cmd(&mut conn, &evt_tx, cmd) {
                        break;
                    }
                }
                // UI side dropped the handle; nothing left to serve.
                Err(_) => break,
            },
            recv(frames) -> frame => match frame {
                Ok(frame) => forward_unsolicited(&evt_tx, frame),
                Err(_) => {
                    report_disconnect(&evt_tx);
                    break;
                }
            },
        }
    }
}

fn handle_cmd(conn: &mut RemoteConn, evt_tx: &Sender<BridgeEvent>, cmd: BridgeCmd) -> bool {
    use BridgeErrorSource as Src;
    match cmd {
        BridgeCmd::LoadClips { generation } => dispatch(
            conn,
            evt_tx,
            Src::Load,
            Command::GetClips,
            |clips| BridgeEvent::ClipsLoaded { generation, clips },
        ),
        BridgeCmd::DeleteClip { id } => delete_clips(conn, evt_tx, vec![id]),
        BridgeCmd::DeleteClips { ids } => delete_clips(conn, evt_tx, ids),
        BridgeCmd::UpdateClip { id, content } => {
            match invoke::<bool>(
                conn,
                evt_tx,
                Command::UpdateClip {
                    id: id.clone(),
                    content: content.clone(),
                },
            ) {
                Ok(true) => {
                    let _ = evt_tx.send(BridgeEvent::ClipSaved { id, content });
                    true
                }
                Ok(false) => send_rejection(
                    evt_tx,
                    Src::SaveContent,
                    BackendErrorKind::NotFound,
                    "clip no longer exists",
                ),
                Err(err) => send_failure(evt_tx, Src::SaveContent, err),
            }
        }
        BridgeCmd::ReorderClips { ids } => dispatch(
            conn,
            evt_tx,
            Src::Reorder,
            Command::ReorderClips { ids },
            |_: ()| BridgeEvent::ReorderApplied,
        ),
        BridgeCmd::MergeClips { ids } => dispatch(
            conn,
            evt_tx,
            Src::Merge,
            Command::MergeClips { ids },
            |clip| BridgeEvent::MergeCompleted { clip },
        ),
        BridgeCmd::CopyAllToClipboard => dispatch(
            conn,
            evt_tx,
            Src::Other,
            Command::CopyAllToClipboard,
            |_: ()| BridgeEvent::AllCopied,
        ),
        BridgeCmd::ClearAllClips => dispatch(
            conn,
            evt_tx,
            Src::Other,
            Command::ClearAllClips,
            |_: ()| BridgeEvent::AllCleared,
        ),
        BridgeCmd::LoadPastebooks => {
            let books = match invoke(conn, evt_tx, Command::ListPastebooks) {
                Ok(books) => books,
                Err(err) => return send_failure(evt_tx, Src::Pastebook, err),
            };
            match invoke(conn, evt_tx, Command::GetActivePastebook) {
                Ok(active) => {
                    let _ = evt_tx.send(BridgeEvent::PastebooksLoaded { books, active });
                    true
                }
                Err(err) => send_failure(evt_tx, Src::Pastebook, err),
            }
        }
        BridgeCmd::SwitchPastebook { id } => {
            match invoke::<bool>(conn, evt_tx, Command::SwitchPastebook { id: id.clone() }) {
                Ok(switched) => {
                    let _ = evt_tx.send(BridgeEvent::PastebookSwitched { id, switched });
                    true
                }
                Err(err) => send_failure(evt_tx, Src::Pastebook, err),
            }
        }
        BridgeCmd::CreatePastebook { name } => dispatch(
            conn,
            evt_tx,
            Src::Pastebook,
            Command::CreatePastebook { name },
            |pastebook| BridgeEvent::PastebookCreated { pastebook },
        ),
        BridgeCmd::DeletePastebook { id } => {
            match invoke::<bool>(conn, evt_tx, Command::DeletePastebook { id: id.clone() }) {
                Ok(deleted) => {
                    let _ = evt_tx.send(BridgeEvent::PastebookDeleted { id, deleted });
                    true
                }
                Err(err) => send_failure(evt_tx, Src::Pastebook, err),
            }
        }
        BridgeCmd::RenamePastebook { id, name } => {
            match invoke::<bool>(
                conn,
                evt_tx,
                Command::RenamePastebook {
                    id: id.clone(),
                    name,
                },
            ) {
                Ok(renamed) => {
                    let _ = evt_tx.send(BridgeEvent::PastebookRenamed { id, renamed });
                    true
                }
                Err(err) => send_failure(evt_tx, Src::Pastebook, err),
            }
        }
        BridgeCmd::MagicSort => dispatch(
            conn,
            evt_tx,
            Src::Sort,
            Command::MagicSort,
            |_: ()| BridgeEvent::SortApplied,
        ),
        BridgeCmd::ChatSubmit { prompt } => dispatch(
            conn,
            evt_tx,
            Src::Chat,
            Command::ChatSubmit { prompt },
            |reply| BridgeEvent::ChatReply { reply },
        ),
        BridgeCmd::SetApiKey { api_key } => dispatch(
            conn,
            evt_tx,
            Src::Settings,
            Command::SetApiKey { api_key },
            |_: ()| BridgeEvent::ApiKeySaved,
        ),
        BridgeCmd::LoadModels => dispatch(
            conn,
            evt_tx,
            Src::Settings,
            Command::GetModels,
            |models| BridgeEvent::ModelsLoaded { models },
        ),
        BridgeCmd::EmitFocusClip { id } => match conn.send_emit(PushEvent::FocusClip { id }) {
            Ok(()) => true,
            Err(err) => send_failure(evt_tx, Src::Other, err),
        },
    }
}

/// Issue one invocation and map its decoded reply to an event.
fn dispatch<T, F>(
    conn: &mut RemoteConn,
    evt_tx: &Sender<BridgeEvent>,
    source: BridgeErrorSource,
    command: Command,
    on_ok: F,
) -> bool
where
    T: DeserializeOwned,
    F: FnOnce(T) -> BridgeEvent,
{
    match invoke::<T>(conn, evt_tx, command) {
        Ok(value) => {
            let _ = evt_tx.send(on_ok(value));
            true
        }
        Err(err) => send_failure(evt_tx, source, err),
    }
}

/// Sequential per-id deletion. Any id can fail while the others succeed; the
/// result reports both sets so the caller keeps failed ids in its cache.
fn delete_clips(conn: &mut RemoteConn, evt_tx: &Sender<BridgeEvent>, ids: Vec<String>) -> bool {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut lost_connection = false;
    let mut pending = ids.into_iter();
    for id in pending.by_ref() {
        match invoke::<bool>(conn, evt_tx, Command::DeleteClip { id: id.clone() }) {
            // `false` means the clip was already gone backend-side; either
            // way it must leave the cache.
            Ok(_) => deleted.push(id),
            Err(err) if is_connection_loss(&err) => {
                failed.push(id);
                lost_connection = true;
                break;
            }
            Err(err) => {
                error!("delete failed for clip {}: {}", id, err);
                failed.push(id);
            }
        }
    }
    failed.extend(pending);
    let _ = evt_tx.send(BridgeEvent::ClipsDeleted { deleted, failed });
    if lost_connection {
        report_disconnect(evt_tx);
        return false;
    }
    true
}

/// Send one request and wait for its reply, forwarding any pushed events
/// that arrive in between. Replies for other request ids are dropped.
fn invoke<T: DeserializeOwned>(
    conn: &mut RemoteConn,
    evt_tx: &Sender<BridgeEvent>,
    command: Command,
) -> Result<T, AppError> {
    let id = conn.send_request(command)?;
    loop {
        match conn.frames().recv() {
            Ok(ServerFrame::Event { event }) => forward_push(evt_tx, event),
            Ok(ServerFrame::Reply {
                id: reply_id,
                ok,
                err,
            }) => {
                if reply_id != id {
                    warn!(reply_id, expected = id, "dropping stale backend reply");
                    continue;
                }
                if let Some(err) = err {
                    return Err(AppError::Backend {
                        kind: err.kind,
                        message: err.message,
                    });
                }
                return Ok(serde_json::from_value(ok.unwrap_or(Value::Null))?);
            }
            Err(_) => return Err(AppError::ConnectionClosed),
        }
    }
}

fn forward_unsolicited(evt_tx: &Sender<BridgeEvent>, frame: ServerFrame) {
    match frame {
        ServerFrame::Event { event } => forward_push(evt_tx, event),
        ServerFrame::Reply { id, .. } => {
            warn!(id, "dropping stale backend reply with no request in flight");
        }
    }
}

fn forward_push(evt_tx: &Sender<BridgeEvent>, event: PushEvent) {
    let event = match event {
        PushEvent::ClipCaptured(clip) => BridgeEvent::ClipCaptured { clip },
        PushEvent::ClipsUpdated => BridgeEvent::ClipsUpdated,
        PushEvent::FocusClip { id } => BridgeEvent::FocusClip { id },
    };
    let _ = evt_tx.send(event);
}

fn is_connection_loss(err: &AppError) -> bool {
    matches!(err, AppError::ConnectionClosed | AppError::Transport(_))
}

/// Map a failed invocation to an error event.
///
/// # Returns
/// `false` when the connection is gone and the worker should stop.
fn send_failure(evt_tx: &Sender<BridgeEvent>, source: BridgeErrorSource, err: AppError) -> bool {
    if is_connection_loss(&err) {
        report_disconnect(evt_tx);
        return false;
    }
    error!("backend request failed ({:?}): {}", source, err);
    let kind = err.kind();
    let message = match &err {
        AppError::Backend { message, .. } => message.clone(),
        other => other.to_string(),
    };
    let _ = evt_tx.send(BridgeEvent::Error {
        source,
        kind,
        message,
    });
    true
}

fn send_rejection(
    evt_tx: &Sender<BridgeEvent>,
    source: BridgeErrorSource,
    kind: BackendErrorKind,
    message: &str,
) -> bool {
    let _ = evt_tx.send(BridgeEvent::Error {
        source,
        kind,
        message: message.to_string(),
    });
    true
}

fn report_disconnect(evt_tx: &Sender<BridgeEvent>) {
    error!("backend connection closed");
    let _ = evt_tx.send(BridgeEvent::Error {
        source: BridgeErrorSource::Connection,
        kind: BackendErrorKind::Unavailable,
        message: "Backend connection lost.".to_string(),
    });
}
