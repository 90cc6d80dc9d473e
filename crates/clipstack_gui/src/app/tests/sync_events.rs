//! Push-event reconciliation: captures, stale loads, focus, failures.

use super::*;

#[test]
fn captured_clip_prepends_even_with_a_load_in_flight() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one"), make_clip("b", "two")]);

    // A reload is in flight when the push lands.
    harness.app.request_clips();
    let _ = recv_cmd(&harness.cmd_rx);
    harness.app.apply_event(BridgeEvent::ClipCaptured {
        clip: make_clip("fresh", "captured"),
    });

    assert_eq!(cached_ids(&harness.app), vec!["fresh", "a", "b"]);
}

#[test]
fn rebroadcast_captures_are_deduplicated_by_id() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one")]);

    harness.app.apply_event(BridgeEvent::ClipCaptured {
        clip: make_clip("a", "one"),
    });

    assert_eq!(harness.app.clips.len(), 1);
}

#[test]
fn superseded_load_generations_are_dropped() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one")]);

    harness.app.request_clips();
    let first_generation = harness.app.clips_generation;
    let _ = recv_cmd(&harness.cmd_rx);
    harness.app.request_clips();
    let _ = recv_cmd(&harness.cmd_rx);

    // The older response arrives late and loses the race.
    harness.app.apply_event(BridgeEvent::ClipsLoaded {
        generation: first_generation,
        clips: vec![make_clip("stale", "old")],
    });
    assert_eq!(cached_ids(&harness.app), vec!["a"]);
    assert_eq!(harness.app.sync_stats.stale_loads_dropped, 1);

    load_clips(&mut harness, vec![make_clip("current", "new")]);
    assert_eq!(cached_ids(&harness.app), vec!["current"]);
}

#[test]
fn clips_updated_push_triggers_a_full_reload() {
    let mut harness = make_app();
    let before = harness.app.clips_generation;

    harness.app.apply_event(BridgeEvent::ClipsUpdated);

    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadClips { generation } => assert_eq!(generation, before + 1),
        other => panic!("expected reload, got {:?}", other),
    }
}

#[test]
fn focus_clip_expands_and_requests_scroll() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one")]);

    harness.app.apply_event(BridgeEvent::FocusClip {
        id: "a".to_string(),
    });

    assert!(harness.app.expanded.contains("a"));
    assert_eq!(harness.app.focus_request.as_deref(), Some("a"));
}

#[test]
fn invalid_api_key_errors_open_the_settings_dialog() {
    let mut harness = make_app();
    harness.app.chat_in_flight = true;

    harness.app.apply_event(BridgeEvent::Error {
        source: BridgeErrorSource::Chat,
        kind: BackendErrorKind::InvalidApiKey,
        message: "no key configured".to_string(),
    });

    assert!(harness.app.settings_open);
    assert!(!harness.app.chat_in_flight);
    assert!(harness.app.status.is_some());
}

#[test]
fn connection_loss_resets_every_in_flight_flag() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one")]);
    harness.app.begin_edit("a");
    harness.app.merge_in_flight = true;
    harness.app.sort_in_flight = true;
    harness.app.chat_in_flight = true;
    harness.app.clear_in_flight = true;
    harness.app.edit_draft.as_mut().expect("draft").in_flight = true;

    harness.app.apply_event(BridgeEvent::Error {
        source: BridgeErrorSource::Connection,
        kind: BackendErrorKind::Unavailable,
        message: "Backend connection lost.".to_string(),
    });

    assert!(!harness.app.merge_in_flight);
    assert!(!harness.app.sort_in_flight);
    assert!(!harness.app.chat_in_flight);
    assert!(!harness.app.clear_in_flight);
    assert!(!harness.app.edit_draft.as_ref().expect("draft").in_flight);
}

#[test]
fn clear_all_applies_the_known_empty_delta() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one"), make_clip("b", "two")]);
    harness.app.select_all();

    harness.app.clear_all();
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::ClearAllClips => {}
        other => panic!("expected clear command, got {:?}", other),
    }
    // Still cached until the backend confirms.
    assert_eq!(harness.app.clips.len(), 2);

    harness.app.apply_event(BridgeEvent::AllCleared);
    assert!(harness.app.clips.is_empty());
    assert!(harness.app.selection.is_empty());
}

#[test]
fn magic_sort_completion_forces_a_reload() {
    let mut harness = make_app();
    load_clips(&mut harness, vec![make_clip("a", "one"), make_clip("b", "two")]);

    harness.app.magic_sort();
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::MagicSort => {}
        other => panic!("expected sort command, got {:?}", other),
    }
    assert!(harness.app.sort_in_flight);

    harness.app.apply_event(BridgeEvent::SortApplied);
    assert!(!harness.app.sort_in_flight);
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadClips { .. } => {}
        other => panic!("expected reload after sort, got {:?}", other),
    }
}

#[test]
fn chat_round_trip_tracks_history_and_in_flight_state() {
    let mut harness = make_app();
    harness.app.chat_input = "summarize my clips".to_string();

    harness.app.submit_chat();
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::ChatSubmit { prompt } => assert_eq!(prompt, "summarize my clips"),
        other => panic!("expected chat command, got {:?}", other),
    }
    assert!(harness.app.chat_in_flight);
    assert!(harness.app.chat_input.is_empty());
    assert_eq!(harness.app.chat_history.len(), 1);

    harness.app.apply_event(BridgeEvent::ChatReply {
        reply: "done".to_string(),
    });
    assert!(!harness.app.chat_in_flight);
    assert_eq!(harness.app.chat_history.len(), 2);
    assert_eq!(harness.app.chat_history[1].text, "done");
}

#[test]
fn blank_api_key_is_rejected_locally() {
    let mut harness = make_app();
    harness.app.api_key_input = "  ".to_string();

    harness.app.save_api_key();

    assert_no_cmd(&harness.cmd_rx);
    assert_eq!(
        harness.app.status.as_ref().map(|status| status.text.as_str()),
        Some("API key cannot be empty.")
    );
}
