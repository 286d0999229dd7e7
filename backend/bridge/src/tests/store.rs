use crate::store::{SlotState, StateStore};

use pazcore::{
    ClientState, CoreEvent, CoreResponse, EventStream, ReminderState, ReminderStatus,
};

use std::sync::Arc;

fn state_with_reminder() -> ClientState {
    let mut state = ClientState::new("Ada");
    state
        .reminders
        .push(ReminderState::new("r1", "Water", 1800));
    state
}

/// **VALUE**: Before anything arrives, every slot holds its documented placeholder.
#[test]
fn given_new_store_when_read_then_slots_hold_placeholders() {
    let store = StateStore::new();

    assert_eq!(store.client_state(), ClientState::default());
    assert_eq!(store.client_state_slot(), SlotState::Unset);

    let status = store.reminder_status();
    assert_eq!(status.id, "");
    assert!(status.next_duration_ms < 0);
    assert_eq!(store.event_slot(EventStream::ReminderStatus), SlotState::Unset);
}

/// **VALUE**: Responses that carry no state leave the store alone.
///
/// **BUG THIS CATCHES**: Would catch a store that treats any response as a state
/// refresh (e.g. resetting `ClientState` on `Success`).
#[test]
fn given_non_state_responses_when_applied_then_store_unchanged() {
    let store = StateStore::new();

    for response in [
        CoreResponse::Success(()),
        CoreResponse::Sum(6),
        CoreResponse::RunningJobs(vec!["r1".to_string()]),
    ] {
        assert!(!store.apply_response(&response), "{} should not change the store", response.key());
    }

    assert_eq!(store.client_state_slot(), SlotState::Unset);
    assert_eq!(store.client_state(), ClientState::default());
}

/// **VALUE**: A `ClientGetState` response replaces the snapshot wholesale.
///
/// **WHY THIS MATTERS**: Merging would resurrect reminders the core already
/// deleted.
#[test]
fn given_known_state_when_newer_state_applied_then_replaced_without_merge() {
    let store = StateStore::new();
    store.apply_response(&CoreResponse::ClientGetState(state_with_reminder()));

    let newer = ClientState::new("Ada Lovelace");
    let changed = store.apply_response(&CoreResponse::ClientGetState(newer.clone()));

    assert!(changed);
    assert_eq!(store.client_state(), newer);
    assert!(store.client_state().reminders.is_empty(), "No merge with the old list");
    assert_eq!(store.client_state_slot(), SlotState::Known);
}

#[test]
fn given_reminder_status_events_when_applied_then_slot_holds_latest_only() {
    let store = StateStore::new();

    store.apply_event(&CoreEvent::ReminderNewStatus(ReminderStatus::new("r1", 4000)));
    store.apply_event(&CoreEvent::ReminderNewStatus(ReminderStatus::new("r2", 900)));

    assert_eq!(store.reminder_status(), ReminderStatus::new("r2", 900));
    assert_eq!(store.event_slot(EventStream::ReminderStatus), SlotState::Known);
    // Event slots and the state slot move independently
    assert_eq!(store.client_state_slot(), SlotState::Unset);
}

/// **VALUE**: Watchers are woken by every replacement.
#[tokio::test]
async fn given_watcher_when_slot_replaced_then_watcher_sees_new_value() {
    let store = StateStore::new();
    let mut client_rx = store.watch_client_state();
    let mut status_rx = store.watch_reminder_status();

    store.apply_response(&CoreResponse::ClientGetState(state_with_reminder()));
    store.apply_event(&CoreEvent::ReminderNewStatus(ReminderStatus::new("r1", 4000)));

    client_rx.changed().await.unwrap();
    assert_eq!(*client_rx.borrow_and_update(), state_with_reminder());
    status_rx.changed().await.unwrap();
    assert_eq!(*status_rx.borrow_and_update(), ReminderStatus::new("r1", 4000));
}

/// **BUG THIS CATCHES**: Would catch watchers being woken before the slot is
/// marked `Known`, so a watcher on another thread reads `Unset` right after
/// `changed()`.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_watcher_on_other_thread_when_woken_then_slot_already_known() {
    for _ in 0..100 {
        let store = Arc::new(StateStore::new());
        let mut status_rx = store.watch_reminder_status();
        let mut client_rx = store.watch_client_state();
        let reader = Arc::clone(&store);

        let watcher = tokio::spawn(async move {
            status_rx.changed().await.unwrap();
            let status_slot = reader.event_slot(EventStream::ReminderStatus);
            client_rx.changed().await.unwrap();
            (status_slot, reader.client_state_slot())
        });

        store.apply_event(&CoreEvent::ReminderNewStatus(ReminderStatus::new("r1", 4000)));
        store.apply_response(&CoreResponse::ClientGetState(state_with_reminder()));

        assert_eq!(watcher.await.unwrap(), (SlotState::Known, SlotState::Known));
    }
}
