//! Typed mediator over a [`Boundary`].
//!
//! Each `command`/`query` is exactly one `invoke` call, resolved with the
//! core's response or failed with the boundary's rejection. There is no retry,
//! no timeout and no store update here; callers decide what a response means
//! for their state.

use crate::boundary::{Boundary, EventCallback, InvokePayload, Unlisten};
use crate::error::BridgeError;

use pazcore::protocol::{CLIENT_COMMAND, CLIENT_QUERY, CORE_EVENT};
use pazcore::{ClientCommand, ClientQuery, CoreEvent, CoreResponse};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

pub struct Transport<B: Boundary> {
    boundary: Arc<B>,
}

impl<B: Boundary> Clone for Transport<B> {
    fn clone(&self) -> Self {
        Self {
            boundary: Arc::clone(&self.boundary),
        }
    }
}

impl<B: Boundary> Transport<B> {
    pub fn new(boundary: B) -> Self {
        Self {
            boundary: Arc::new(boundary),
        }
    }

    /// Send a command and wait for its response.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Boundary`] with the boundary's rejection, unchanged
    /// - [`BridgeError::Decode`] if the answer is not a [`CoreResponse`]
    pub async fn command(&self, cmd: ClientCommand) -> Result<CoreResponse, BridgeError> {
        let payload = encode(&cmd)?;
        self.call(CLIENT_COMMAND, cmd.key(), payload).await
    }

    /// Send a query and wait for its response. Same contract as
    /// [`Transport::command`]; read-only is a convention of the key, not
    /// something enforced here.
    pub async fn query(&self, query: ClientQuery) -> Result<CoreResponse, BridgeError> {
        let payload = encode(&query)?;
        self.call(CLIENT_QUERY, query.key(), payload).await
    }

    /// Invoke `callback` once per core event until the returned subscription
    /// is released.
    ///
    /// Events that do not decode as [`CoreEvent`] are logged and dropped.
    pub async fn subscribe<F>(&self, callback: F) -> Result<Subscription, BridgeError>
    where
        F: Fn(CoreEvent) + Send + Sync + 'static,
    {
        let gate = Arc::new(Gate::default());
        let forward_gate = Arc::clone(&gate);

        let forward: EventCallback = Box::new(move |raw: Value| {
            // Held for the whole delivery so unsubscribe waits for it
            let _delivering = forward_gate.lock();
            if !forward_gate.active.load(Ordering::Acquire) {
                return;
            }
            match serde_json::from_value::<CoreEvent>(raw) {
                Ok(event) => callback(event),
                Err(e) => warn!("Dropping {CORE_EVENT} that does not match the protocol: {e}"),
            }
        });

        let unlisten = self.boundary.listen(CORE_EVENT, forward).await?;
        debug!("Subscribed to {CORE_EVENT}");

        Ok(Subscription { gate, unlisten })
    }

    async fn call(
        &self,
        command_name: &'static str,
        key: &'static str,
        payload: InvokePayload,
    ) -> Result<CoreResponse, BridgeError> {
        debug!("{command_name}: {key}");
        let raw = self.boundary.invoke(command_name, payload).await?;
        serde_json::from_value(raw).map_err(|e| BridgeError::decode(e))
    }
}

fn encode<T: Serialize>(request: &T) -> Result<InvokePayload, BridgeError> {
    let data = serde_json::to_value(request).map_err(|e| BridgeError::encode(e))?;
    Ok(InvokePayload { data })
}

/// Delivery gate shared by a subscription and its callback.
///
/// `delivery` is held while the callback runs and while unsubscribing, so the
/// two never overlap.
struct Gate {
    active: AtomicBool,
    delivery: Mutex<()>,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            active: AtomicBool::new(true),
            delivery: Mutex::new(()),
        }
    }
}

impl Gate {
    fn lock(&self) -> MutexGuard<'_, ()> {
        match self.delivery.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// A live event subscription.
///
/// Released only by [`Subscription::unsubscribe`]. Once that returns, the
/// callback is not running and is not invoked again, even for events the
/// boundary delivers late.
pub struct Subscription {
    gate: Arc<Gate>,
    unlisten: Unlisten,
}

impl Subscription {
    /// Stop delivery. Idempotent.
    ///
    /// Waits for a callback already in progress on another thread to finish.
    /// Must not be called from inside this subscription's own callback.
    pub fn unsubscribe(&self) {
        let _delivering = self.gate.lock();
        if self.gate.active.swap(false, Ordering::AcqRel) {
            self.unlisten.unlisten();
            debug!("Unsubscribed from {CORE_EVENT}");
        }
    }

    pub fn is_active(&self) -> bool {
        self.gate.active.load(Ordering::Acquire)
    }
}
