//! Headless state-flow tests for the canvas surface.
//!
//! The harness wires the app to bare channels so tests script the bridge:
//! outbound commands are asserted on `cmd_rx`, backend truth is injected
//! through `apply_event`.

use super::*;
use crate::backend::{BridgeCmd, BridgeErrorSource, BridgeEvent, BridgeHandle};
use chrono::Utc;
use clipstack_core::constants::DEFAULT_COLLAPSE_THRESHOLD;
use clipstack_core::models::{Clip, ClipMetadata, Pastebook, PastebookSummary};
use clipstack_core::proto::BackendErrorKind;
use crossbeam_channel::{unbounded, Receiver, TryRecvError};

pub(super) struct TestHarness {
    pub(super) app: CanvasApp,
    pub(super) cmd_rx: Receiver<BridgeCmd>,
}

pub(super) fn make_clip(id: &str, content: &str) -> Clip {
    Clip {
        id: id.to_string(),
        content: content.to_string(),
        metadata: ClipMetadata {
            timestamp: Utc::now(),
            source_app: "Terminal".to_string(),
            window_title: "shell".to_string(),
        },
    }
}

pub(super) fn make_app() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (_evt_tx, evt_rx) = unbounded::<BridgeEvent>();
    let bridge = BridgeHandle::from_test_channels(cmd_tx, evt_rx);
    let app = CanvasApp::new(bridge, DEFAULT_COLLAPSE_THRESHOLD);
    // Drop the startup load commands so tests start from a clean queue.
    while cmd_rx.try_recv().is_ok() {}
    TestHarness { app, cmd_rx }
}

/// Inject a full clip load carrying the app's current generation.
pub(super) fn load_clips(harness: &mut TestHarness, clips: Vec<Clip>) {
    let generation = harness.app.clips_generation;
    harness
        .app
        .apply_event(BridgeEvent::ClipsLoaded { generation, clips });
}

pub(super) fn recv_cmd(rx: &Receiver<BridgeCmd>) -> BridgeCmd {
    rx.recv_timeout(std::time::Duration::from_millis(200))
        .expect("expected outbound command")
}

pub(super) fn assert_no_cmd(rx: &Receiver<BridgeCmd>) {
    assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
}

pub(super) fn cached_ids(app: &CanvasApp) -> Vec<String> {
    app.clips.iter().map(|clip| clip.id.clone()).collect()
}

mod ordering_and_pastebooks;
mod sync_events;
