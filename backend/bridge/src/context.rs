use crate::boundary::Boundary;
use crate::error::BridgeError;
use crate::store::StateStore;
use crate::transport::{Subscription, Transport};

use common::ErrorLocation;
use pazcore::{ClientCommand, ClientQuery, ClientState, CoreResponse};

use std::sync::Arc;

use log::info;

/// The bridge an application creates once at startup and passes by reference
/// to whatever needs it.
///
/// Owns the transport, the store, and the subscription that feeds core events
/// into the store.
pub struct Bridge<B: Boundary> {
    transport: Transport<B>,
    store: Arc<StateStore>,
    store_feed: Subscription,
}

impl<B: Boundary> Bridge<B> {
    /// Build the context and start feeding core events into the store.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Boundary`] if the event listener cannot be
    /// registered.
    pub async fn start(boundary: B) -> Result<Self, BridgeError> {
        let transport = Transport::new(boundary);
        let store = Arc::new(StateStore::new());

        let sink = Arc::clone(&store);
        let store_feed = transport
            .subscribe(move |event| sink.apply_event(&event))
            .await?;

        info!("Bridge started");
        Ok(Self {
            transport,
            store,
            store_feed,
        })
    }

    pub fn transport(&self) -> &Transport<B> {
        &self.transport
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Shared handle to the store, for consumers that outlive a borrow of the
    /// bridge (spawned tasks, UI components).
    pub fn shared_store(&self) -> Arc<StateStore> {
        Arc::clone(&self.store)
    }

    /// Send a command, then let the store absorb the response.
    pub async fn command(&self, cmd: ClientCommand) -> Result<CoreResponse, BridgeError> {
        let response = self.transport.command(cmd).await?;
        self.store.apply_response(&response);
        Ok(response)
    }

    /// Send a query, then let the store absorb the response.
    pub async fn query(&self, query: ClientQuery) -> Result<CoreResponse, BridgeError> {
        let response = self.transport.query(query).await?;
        self.store.apply_response(&response);
        Ok(response)
    }

    /// Re-read the core's state into the store.
    ///
    /// Use after a mutating command when the caller needs the store to reflect
    /// it before doing anything else.
    pub async fn refresh(&self) -> Result<ClientState, BridgeError> {
        match self.query(ClientQuery::ClientGetState).await? {
            CoreResponse::ClientGetState(state) => Ok(state),
            other => Err(BridgeError::UnexpectedResponse {
                message: format!("ClientGetState answered with {}", other.key()),
                location: ErrorLocation::here(),
            }),
        }
    }

    /// Stop feeding events into the store. Idempotent; the store keeps its
    /// last values.
    pub fn shutdown(&self) {
        if self.store_feed.is_active() {
            self.store_feed.unsubscribe();
            info!("Bridge event feed stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.store_feed.is_active()
    }
}
