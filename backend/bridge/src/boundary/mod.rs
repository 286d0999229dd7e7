//! The process-boundary primitive the bridge consumes.
//!
//! A host runtime (a webview bridge, a socket, an in-process channel) provides
//! two operations:
//!
//! - `invoke(command_name, { data })`: one-shot request/response
//! - `listen(event_name, callback)`: push subscription, released through the
//!   returned [`Unlisten`]
//!
//! Values cross as `serde_json::Value`; typing them is the transport's job.

mod local;

pub use local::LocalBoundary;

use crate::error::BoundaryError;

use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Receives each raw event value, in delivery order.
pub type EventCallback = Box<dyn Fn(Value) + Send + Sync + 'static>;

/// Argument object of every `invoke`: the request sits under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokePayload {
    pub data: Value,
}

pub trait Boundary: Send + Sync + 'static {
    /// Send one request and resolve with whatever the other side answered.
    fn invoke(
        &self,
        command_name: &str,
        payload: InvokePayload,
    ) -> impl Future<Output = Result<Value, BoundaryError>> + Send;

    /// Register `callback` for every event named `event_name`.
    fn listen(
        &self,
        event_name: &str,
        callback: EventCallback,
    ) -> impl Future<Output = Result<Unlisten, BoundaryError>> + Send;
}

impl<B: Boundary> Boundary for Arc<B> {
    fn invoke(
        &self,
        command_name: &str,
        payload: InvokePayload,
    ) -> impl Future<Output = Result<Value, BoundaryError>> + Send {
        (**self).invoke(command_name, payload)
    }

    fn listen(
        &self,
        event_name: &str,
        callback: EventCallback,
    ) -> impl Future<Output = Result<Unlisten, BoundaryError>> + Send {
        (**self).listen(event_name, callback)
    }
}

type Release = Box<dyn FnOnce() + Send + 'static>;

/// Capability that deregisters a listener.
///
/// Releasing is explicit and idempotent: only the first [`Unlisten::unlisten`]
/// runs the release, later calls are no-ops. Dropping the handle does **not**
/// release the listener.
pub struct Unlisten {
    release: Mutex<Option<Release>>,
}

impl Unlisten {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Mutex::new(Some(Box::new(release))),
        }
    }

    /// Release the listener. Returns `true` if this call did the release.
    pub fn unlisten(&self) -> bool {
        let release = match self.release.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match release {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }

    pub fn is_listening(&self) -> bool {
        match self.release.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

impl std::fmt::Debug for Unlisten {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unlisten")
            .field("listening", &self.is_listening())
            .finish()
    }
}
