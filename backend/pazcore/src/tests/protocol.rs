// Wire-shape tests for the protocol enums. The UI side depends on these exact
// JSON layouts, so each test pins one literal shape.

use crate::protocol::{
    ClientCommand, ClientQuery, CoreEvent, CoreResponse, EventStream, ReminderStatus,
};
use crate::state::{ClientState, ReminderState};

use serde_json::json;

/// **VALUE**: Commands serialize as `{ key, params }`.
///
/// **BUG THIS CATCHES**: Would catch a change of serde tagging on `ClientCommand`,
/// which would make every UI command unreadable by the core.
#[test]
fn given_add_one_command_when_serialized_then_uses_key_and_params() {
    let cmd = ClientCommand::AddOne { value: 5 };

    let value = serde_json::to_value(&cmd).unwrap();

    assert_eq!(value, json!({ "key": "AddOne", "params": { "value": 5 } }));
}

#[test]
fn given_new_reminder_json_when_decoded_then_carries_reminder_state() {
    let raw = json!({
        "key": "NewReminder",
        "params": { "reminder": { "id": "r1", "name": "Stretch", "wait_sec": 1800 } }
    });

    let cmd: ClientCommand = serde_json::from_value(raw).unwrap();

    assert_eq!(
        cmd,
        ClientCommand::NewReminder {
            reminder: ReminderState::new("r1", "Stretch", 1800)
        }
    );
    assert_eq!(cmd.key(), "NewReminder");
}

/// **VALUE**: Unit queries carry only their key.
#[test]
fn given_client_get_state_query_when_serialized_then_has_no_params() {
    let value = serde_json::to_value(ClientQuery::ClientGetState).unwrap();

    assert_eq!(value, json!({ "key": "ClientGetState" }));
}

/// **VALUE**: Acknowledgement responses carry `data: null`.
///
/// **WHY THIS MATTERS**: UI code checks `data === null` for acknowledgement-only
/// responses; an omitted `data` field would read as `undefined` instead.
#[test]
fn given_success_response_when_serialized_then_data_is_null() {
    let value = serde_json::to_value(CoreResponse::Success(())).unwrap();

    assert_eq!(value, json!({ "key": "Success", "data": null }));
}

#[test]
fn given_client_state_response_json_when_decoded_then_state_is_verbatim() {
    let raw = json!({
        "key": "ClientGetState",
        "data": {
            "first_name": "Ada",
            "reminders": [{ "id": "r1", "name": "Water", "wait_sec": 60 }]
        }
    });

    let response: CoreResponse = serde_json::from_value(raw).unwrap();

    let mut expected = ClientState::new("Ada");
    expected.reminders.push(ReminderState::new("r1", "Water", 60));
    assert_eq!(response, CoreResponse::ClientGetState(expected));
}

/// **VALUE**: An unknown key is a protocol mismatch, not a silent fallback.
///
/// **BUG THIS CATCHES**: Would catch someone adding `#[serde(other)]` or a
/// catch-all variant that quietly swallows commands the core doesn't know.
#[test]
fn given_unknown_command_key_when_decoded_then_fails() {
    let raw = json!({ "key": "Multiply", "params": { "x": 2, "y": 3 } });

    let result: Result<ClientCommand, _> = serde_json::from_value(raw);

    assert!(result.is_err(), "Unknown keys must not decode");
}

#[test]
fn given_malformed_params_when_decoded_then_fails() {
    let raw = json!({ "key": "AddOne", "params": { "value": "five" } });

    let result: Result<ClientCommand, _> = serde_json::from_value(raw);

    assert!(result.is_err(), "Params shape is fixed per key");
}

/// **VALUE**: Events are externally tagged: `{ ReminderNewStatus: {...} }`.
#[test]
fn given_reminder_status_event_json_when_decoded_then_maps_to_reminder_stream() {
    let raw = json!({ "ReminderNewStatus": { "id": "r1", "next_duration_ms": 4000 } });

    let event: CoreEvent = serde_json::from_value(raw).unwrap();

    assert_eq!(
        event,
        CoreEvent::ReminderNewStatus(ReminderStatus::new("r1", 4000))
    );
    assert_eq!(event.stream(), EventStream::ReminderStatus);
}

#[test]
fn given_unset_reminder_status_when_inspected_then_is_sentinel() {
    let status = ReminderStatus::default();

    assert!(status.is_unset());
    assert_eq!(status.id, "");
    assert!(status.next_duration_ms < 0);
    assert!(!ReminderStatus::new("r1", 0).is_unset());
}
