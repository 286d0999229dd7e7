use paz::commands::client::{execute_command, execute_query};
use paz::error::PazError;

use pazcore::{
    ClientCommand, ClientQuery, Core, CoreConfig, CoreResponse, ReminderState,
};

// ============================================================================
// Host command handlers against a running core, without a webview
// ============================================================================

/// **VALUE**: The handlers the webview invokes reach the engine and return its
/// response untouched.
#[tokio::test]
async fn given_running_core_when_add_invoked_then_sum_returned() {
    let controller = Core::spawn(&CoreConfig::default());

    let response = execute_command(&controller, ClientCommand::Add { x: 2, y: 3 })
        .await
        .unwrap();

    assert_eq!(response, CoreResponse::Sum(5));
}

/// **VALUE**: The configured name is what the UI reads back.
#[tokio::test]
async fn given_configured_name_when_state_queried_then_name_returned() {
    let config = CoreConfig {
        first_name: String::from("Ada"),
        ..CoreConfig::default()
    };
    let controller = Core::spawn(&config);

    let response = execute_query(&controller, ClientQuery::ClientGetState)
        .await
        .unwrap();

    match response {
        CoreResponse::ClientGetState(state) => {
            assert_eq!(state.first_name, "Ada");
            assert!(state.reminders.is_empty());
        }
        other => panic!("Expected ClientGetState, got {other:?}"),
    }
}

#[tokio::test]
async fn given_existing_reminder_when_added_again_then_core_error() {
    let controller = Core::spawn(&CoreConfig::default());
    let reminder = ReminderState::new("r1", "Water", 60);

    execute_command(
        &controller,
        ClientCommand::NewReminder {
            reminder: reminder.clone(),
        },
    )
    .await
    .unwrap();
    let duplicate = execute_command(&controller, ClientCommand::NewReminder { reminder }).await;

    assert!(matches!(duplicate, Err(PazError::Core { .. })));
}
