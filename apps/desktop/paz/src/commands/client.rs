//! Host commands the webview invokes: `client_command` and `client_query`.
//!
//! Each takes its request under `data` and answers with the core's
//! [`CoreResponse`], or rejects with a [`PazError`].

use crate::error::PazError;

use pazcore::{ClientCommand, ClientQuery, CoreController, CoreResponse};

use log::{debug, error};
use tauri::{State, command as TauriCommand};

#[TauriCommand]
pub async fn client_command(
    controller: State<'_, CoreController>,
    data: ClientCommand,
) -> Result<CoreResponse, PazError> {
    execute_command(&controller, data).await
}

#[TauriCommand]
pub async fn client_query(
    controller: State<'_, CoreController>,
    data: ClientQuery,
) -> Result<CoreResponse, PazError> {
    execute_query(&controller, data).await
}

/// Run `data` on the core. Split from the Tauri wrapper so it can be driven
/// without a webview.
pub async fn execute_command(
    controller: &CoreController,
    data: ClientCommand,
) -> Result<CoreResponse, PazError> {
    let key = data.key();
    debug!("client_command: {key}");

    controller.command(data).await.map_err(|e| {
        error!("client_command {key} failed: {e}");
        PazError::from(e)
    })
}

pub async fn execute_query(
    controller: &CoreController,
    data: ClientQuery,
) -> Result<CoreResponse, PazError> {
    let key = data.key();
    debug!("client_query: {key}");

    controller.query(data).await.map_err(|e| {
        error!("client_query {key} failed: {e}");
        PazError::from(e)
    })
}
