//! Core event forwarding to the webview.

use pazcore::CoreEvent;
use pazcore::protocol::CORE_EVENT;

use std::fmt::Display;

use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Hand every event from `events` to `emit`, in order, until the core's event
/// channel closes.
///
/// A failed emit is logged and the loop carries on with the next event; a
/// lagging receiver logs how many events it skipped.
pub async fn forward<F, E>(mut events: broadcast::Receiver<CoreEvent>, emit: F)
where
    F: Fn(&CoreEvent) -> Result<(), E>,
    E: Display,
{
    info!("Forwarding core events as '{CORE_EVENT}'");

    loop {
        match events.recv().await {
            Ok(event) => {
                if let Err(e) = emit(&event) {
                    warn!("Failed to emit {CORE_EVENT}: {e}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event forwarder lagged, {skipped} events dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }

    debug!("Core event channel closed, forwarder stopping");
}
