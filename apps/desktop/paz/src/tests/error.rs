// Tests error serialization (what the webview's invoke rejects with)

use crate::error::PazError;

use common::ErrorLocation;

use pazcore::{ClientCommand, Core, CoreConfig, CoreError};

/// **VALUE**: Tests that errors serialize with the variant tag and the message.
///
/// **WHY THIS MATTERS**: Tauri commands must return serializable errors. If the
/// shape changes, the UI can no longer tell a rejection from a dead core.
#[test]
fn given_paz_error_when_serialized_then_tagged_with_variant() {
    // GIVEN: A PazError
    let err = PazError::Core {
        message: String::from("Reminder 'r1' already exists"),
        location: ErrorLocation::here(),
    };

    // WHEN: Serializing to JSON
    let json = serde_json::to_value(&err).unwrap();

    // THEN: The variant sits under "type" and the fields under "data"
    assert_eq!(json["type"], "Core");
    assert_eq!(json["data"]["message"], "Reminder 'r1' already exists");
    assert!(json["data"]["location"]["line"].is_number());
}

/// **BUG THIS CATCHES**: Would catch both core failures collapsing into one
/// variant.
#[tokio::test]
async fn given_core_errors_when_converted_then_variant_preserved() {
    let (core, controller) = Core::new(&CoreConfig::default());
    let running = tokio::spawn(core.run());

    let rejected: CoreError = controller
        .command(ClientCommand::DelayReminder {
            id: String::from("missing"),
            delay: 5,
        })
        .await
        .unwrap_err();
    assert!(matches!(PazError::from(rejected), PazError::Core { .. }));

    running.abort();
    let _ = running.await;

    let unavailable = controller
        .command(ClientCommand::AddOne { value: 1 })
        .await
        .unwrap_err();
    assert!(matches!(PazError::from(unavailable), PazError::Unavailable { .. }));
}
