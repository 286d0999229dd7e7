use crate::boundary::{Boundary, EventCallback, InvokePayload, Unlisten};
use crate::error::BoundaryError;

use pazcore::protocol::{CLIENT_COMMAND, CLIENT_QUERY, CORE_EVENT};
use pazcore::{ClientCommand, ClientQuery, CoreController, CoreError};

use log::{debug, warn};
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// In-process boundary over a [`CoreController`].
///
/// Values still travel as JSON, decoded and encoded the way a host bridge
/// would, so a payload that would fail across a real process boundary fails
/// here too.
#[derive(Clone)]
pub struct LocalBoundary {
    controller: CoreController,
}

impl LocalBoundary {
    pub fn new(controller: CoreController) -> Self {
        Self { controller }
    }
}

impl Boundary for LocalBoundary {
    async fn invoke(
        &self,
        command_name: &str,
        payload: InvokePayload,
    ) -> Result<Value, BoundaryError> {
        let result = match command_name {
            CLIENT_COMMAND => {
                let command: ClientCommand = serde_json::from_value(payload.data).map_err(|e| {
                    BoundaryError::rejected(format!("Invalid {CLIENT_COMMAND} payload: {e}"))
                })?;
                self.controller.command(command).await
            }
            CLIENT_QUERY => {
                let query: ClientQuery = serde_json::from_value(payload.data).map_err(|e| {
                    BoundaryError::rejected(format!("Invalid {CLIENT_QUERY} payload: {e}"))
                })?;
                self.controller.query(query).await
            }
            other => {
                return Err(BoundaryError::rejected(format!(
                    "Unknown host command '{other}'"
                )));
            }
        };

        let response = result.map_err(|e| match e {
            CoreError::Rejected { .. } => BoundaryError::rejected(e.to_string()),
            CoreError::Unavailable { .. } => BoundaryError::unavailable(e.to_string()),
        })?;

        serde_json::to_value(response)
            .map_err(|e| BoundaryError::rejected(format!("Failed to encode response: {e}")))
    }

    async fn listen(
        &self,
        event_name: &str,
        callback: EventCallback,
    ) -> Result<Unlisten, BoundaryError> {
        if event_name != CORE_EVENT {
            return Err(BoundaryError::rejected(format!(
                "Unknown event '{event_name}'"
            )));
        }

        let listener_id = Uuid::new_v4();
        let mut events = self.controller.events();

        let forwarder = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => match serde_json::to_value(&event) {
                        Ok(raw) => callback(raw),
                        Err(e) => warn!("Listener {listener_id}: failed to encode event: {e}"),
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Listener {listener_id} lagged, {skipped} events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Listener {listener_id}: core event stream closed");
        });

        debug!("Listener {listener_id} registered for {CORE_EVENT}");
        Ok(Unlisten::new(move || {
            forwarder.abort();
            debug!("Listener {listener_id} released");
        }))
    }
}
