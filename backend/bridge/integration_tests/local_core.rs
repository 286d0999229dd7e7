use bridge::{Boundary, BoundaryError, Bridge, BridgeError, InvokePayload, LocalBoundary, SlotState};

use pazcore::protocol::CLIENT_COMMAND;
use pazcore::{
    ClientCommand, ClientQuery, Core, CoreConfig, CoreResponse, ReminderState, ReminderStatus,
};

use std::time::Duration;

use serde_json::json;

// ============================================================================
// End-to-end: Bridge -> LocalBoundary -> running Core
// ============================================================================

async fn start_bridge() -> Bridge<LocalBoundary> {
    let controller = Core::spawn(&CoreConfig::default());
    Bridge::start(LocalBoundary::new(controller))
        .await
        .expect("Bridge should start over a running core")
}

/// **VALUE**: A full round trip through JSON on both sides.
///
/// **BUG THIS CATCHES**: Would catch a wire shape the core cannot read, or a
/// response the bridge cannot decode.
#[tokio::test]
async fn given_running_core_when_add_one_sent_then_sum_returned() {
    let bridge = start_bridge().await;

    let response = bridge
        .command(ClientCommand::AddOne { value: 41 })
        .await
        .unwrap();

    assert_eq!(response, CoreResponse::Sum(42));
    assert_eq!(bridge.store().client_state_slot(), SlotState::Unset);
}

/// **VALUE**: Saving reminders makes the core push a status that ends up in the
/// store without the test subscribing to anything.
#[tokio::test]
async fn given_running_core_when_reminders_saved_then_status_reaches_store() {
    // GIVEN: A bridge over a live core, watching the reminder slot
    let bridge = start_bridge().await;
    let mut status_rx = bridge.store().watch_reminder_status();

    // WHEN: Saving one reminder
    let response = bridge
        .command(ClientCommand::SaveReminders {
            reminders: vec![ReminderState::new("r1", "Stretch", 4)],
        })
        .await
        .unwrap();
    assert_eq!(response, CoreResponse::Success(()));

    // THEN: The countdown status arrives in the store
    tokio::time::timeout(Duration::from_secs(5), status_rx.changed())
        .await
        .expect("Status should arrive")
        .unwrap();
    assert_eq!(bridge.store().reminder_status(), ReminderStatus::new("r1", 4000));

    // AND: A refresh brings the saved reminder into the state slot
    let state = bridge.refresh().await.unwrap();
    assert_eq!(state.reminders, vec![ReminderState::new("r1", "Stretch", 4)]);
    assert_eq!(bridge.store().client_state(), state);
}

#[tokio::test]
async fn given_saved_reminders_when_jobs_queried_then_running_ids_listed() {
    let bridge = start_bridge().await;
    bridge
        .command(ClientCommand::SaveReminders {
            reminders: vec![
                ReminderState::new("water", "Water", 1800),
                ReminderState::new("eyes", "Look away", 1200),
            ],
        })
        .await
        .unwrap();

    let response = bridge.query(ClientQuery::JobGetRunning).await.unwrap();

    assert_eq!(
        response,
        CoreResponse::RunningJobs(vec!["eyes".to_string(), "water".to_string()])
    );
}

/// **VALUE**: A core-side rejection comes back as the boundary's rejection, not
/// as a decode failure or a panic.
#[tokio::test]
async fn given_core_rejects_when_command_sent_then_boundary_rejection_surfaced() {
    let bridge = start_bridge().await;

    let result = bridge
        .command(ClientCommand::DelayReminder {
            id: "missing".to_string(),
            delay: 10,
        })
        .await;

    match result {
        Err(BridgeError::Boundary(BoundaryError::Rejected { message, .. })) => {
            assert!(message.contains("missing"), "Unexpected message: {message}");
        }
        other => panic!("Expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn given_local_boundary_when_unknown_command_invoked_then_rejected() {
    let controller = Core::spawn(&CoreConfig::default());
    let boundary = LocalBoundary::new(controller);

    let unknown = boundary
        .invoke("bogus", InvokePayload { data: json!({}) })
        .await;
    let malformed = boundary
        .invoke(CLIENT_COMMAND, InvokePayload { data: json!({ "key": "Nope" }) })
        .await;

    assert!(matches!(unknown, Err(BoundaryError::Rejected { .. })));
    assert!(matches!(malformed, Err(BoundaryError::Rejected { .. })));
}

/// **VALUE**: A stopped core reads as unavailable rather than hanging forever.
#[tokio::test]
async fn given_stopped_core_when_command_sent_then_unavailable() {
    let (core, controller) = Core::new(&CoreConfig::default());
    drop(core);
    let bridge = Bridge::start(LocalBoundary::new(controller)).await.unwrap();

    let result = bridge.command(ClientCommand::AddOne { value: 1 }).await;

    assert!(matches!(
        result,
        Err(BridgeError::Boundary(BoundaryError::Unavailable { .. }))
    ));
}
