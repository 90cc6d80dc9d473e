//! Drag-reorder confirmation and pastebook switching flows.

use super::*;

#[test]
fn drag_reorder_is_optimistic_then_confirmed() {
    let mut harness = make_app();
    load_clips(
        &mut harness,
        vec![
            make_clip("a", "one"),
            make_clip("b", "two"),
            make_clip("c", "three"),
        ],
    );

    harness.app.move_clip_local("c", 0);
    // Local order changes before any backend round-trip.
    assert_eq!(cached_ids(&harness.app), vec!["c", "a", "b"]);

    harness.app.confirm_reorder();
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::ReorderClips { ids } => assert_eq!(ids, vec!["c", "a", "b"]),
        other => panic!("expected reorder command, got {:?}", other),
    }

    harness.app.apply_event(BridgeEvent::ReorderApplied);
    assert_eq!(cached_ids(&harness.app), vec!["c", "a", "b"]);
}

#[test]
fn rejected_reorder_reloads_backend_order() {
    let mut harness = make_app();
    load_clips(
        &mut harness,
        vec![
            make_clip("a", "one"),
            make_clip("b", "two"),
            make_clip("c", "three"),
        ],
    );
    harness.app.move_clip_local("c", 0);
    harness.app.confirm_reorder();
    let _ = recv_cmd(&harness.cmd_rx);

    harness.app.apply_event(BridgeEvent::Error {
        source: BridgeErrorSource::Reorder,
        kind: BackendErrorKind::Internal,
        message: "order conflict".to_string(),
    });

    // Reload-on-conflict, not a manual undo.
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadClips { .. } => {}
        other => panic!("expected reload after rejection, got {:?}", other),
    }
    load_clips(
        &mut harness,
        vec![
            make_clip("a", "one"),
            make_clip("b", "two"),
            make_clip("c", "three"),
        ],
    );
    assert_eq!(cached_ids(&harness.app), vec!["a", "b", "c"]);
}

#[test]
fn switch_dispatches_both_reloads_after_confirmation() {
    let mut harness = make_app();
    harness.app.switch_pastebook("pb-2".to_string());
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::SwitchPastebook { id } => assert_eq!(id, "pb-2"),
        other => panic!("expected switch command, got {:?}", other),
    }

    harness.app.apply_event(BridgeEvent::PastebookSwitched {
        id: "pb-2".to_string(),
        switched: true,
    });

    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadPastebooks => {}
        other => panic!("expected pastebook reload, got {:?}", other),
    }
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadClips { .. } => {}
        other => panic!("expected clip reload, got {:?}", other),
    }
}

#[test]
fn out_of_order_reload_completion_still_settles() {
    let mut harness = make_app();
    harness.app.switch_pastebook("pb-2".to_string());
    let _ = recv_cmd(&harness.cmd_rx);
    harness.app.apply_event(BridgeEvent::PastebookSwitched {
        id: "pb-2".to_string(),
        switched: true,
    });
    let _ = recv_cmd(&harness.cmd_rx);
    let _ = recv_cmd(&harness.cmd_rx);

    // Clip reload lands before the pastebook reload.
    load_clips(&mut harness, vec![make_clip("x", "from pb-2")]);
    harness.app.apply_event(BridgeEvent::PastebooksLoaded {
        books: vec![
            PastebookSummary {
                id: "pb-1".to_string(),
                name: "Default".to_string(),
                count: 3,
            },
            PastebookSummary {
                id: "pb-2".to_string(),
                name: "Research".to_string(),
                count: 1,
            },
        ],
        active: Some(Pastebook {
            id: "pb-2".to_string(),
            name: "Research".to_string(),
        }),
    });

    assert_eq!(cached_ids(&harness.app), vec!["x"]);
    assert_eq!(
        harness.app.active_pastebook.as_ref().map(|active| active.id.as_str()),
        Some("pb-2")
    );
    assert_eq!(harness.app.pastebooks.len(), 2);
}

#[test]
fn failed_switch_keeps_prior_state() {
    let mut harness = make_app();
    harness.app.apply_event(BridgeEvent::PastebooksLoaded {
        books: vec![PastebookSummary {
            id: "pb-1".to_string(),
            name: "Default".to_string(),
            count: 0,
        }],
        active: Some(Pastebook {
            id: "pb-1".to_string(),
            name: "Default".to_string(),
        }),
    });

    harness.app.switch_pastebook("pb-9".to_string());
    let _ = recv_cmd(&harness.cmd_rx);
    harness.app.apply_event(BridgeEvent::PastebookSwitched {
        id: "pb-9".to_string(),
        switched: false,
    });

    // No partial switch: the active pointer never moved, no reloads fired.
    assert_eq!(
        harness.app.active_pastebook.as_ref().map(|active| active.id.as_str()),
        Some("pb-1")
    );
    assert_no_cmd(&harness.cmd_rx);
    assert!(harness.app.status.is_some());
}

#[test]
fn switching_to_the_active_pastebook_is_a_noop() {
    let mut harness = make_app();
    harness.app.apply_event(BridgeEvent::PastebooksLoaded {
        books: Vec::new(),
        active: Some(Pastebook {
            id: "pb-1".to_string(),
            name: "Default".to_string(),
        }),
    });

    harness.app.switch_pastebook("pb-1".to_string());
    assert_no_cmd(&harness.cmd_rx);
}

#[test]
fn create_pastebook_rejects_blank_names_locally() {
    let mut harness = make_app();
    harness.app.new_pastebook_name = "   ".to_string();

    harness.app.create_pastebook();

    assert_no_cmd(&harness.cmd_rx);
    assert_eq!(
        harness.app.status.as_ref().map(|status| status.text.as_str()),
        Some("Pastebook name cannot be empty.")
    );
}

#[test]
fn created_pastebook_triggers_both_reloads() {
    let mut harness = make_app();
    harness.app.new_pastebook_name = "Research".to_string();
    harness.app.create_pastebook();
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::CreatePastebook { name } => assert_eq!(name, "Research"),
        other => panic!("expected create command, got {:?}", other),
    }

    harness.app.apply_event(BridgeEvent::PastebookCreated {
        pastebook: Pastebook {
            id: "pb-9".to_string(),
            name: "Research".to_string(),
        },
    });

    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadPastebooks => {}
        other => panic!("expected pastebook reload, got {:?}", other),
    }
    match recv_cmd(&harness.cmd_rx) {
        BridgeCmd::LoadClips { .. } => {}
        other => panic!("expected clip reload, got {:?}", other),
    }
}

#[test]
fn rename_with_blank_name_is_rejected_locally() {
    let mut harness = make_app();
    harness.app.apply_event(BridgeEvent::PastebooksLoaded {
        books: Vec::new(),
        active: Some(Pastebook {
            id: "pb-1".to_string(),
            name: "Default".to_string(),
        }),
    });
    harness.app.begin_rename_active_pastebook();
    harness.app.rename_draft.as_mut().expect("rename draft").name = " ".to_string();

    harness.app.commit_rename();

    assert_no_cmd(&harness.cmd_rx);
    assert!(harness.app.rename_draft.is_some());
}
