use crate::error::CoreError;
use crate::protocol::{ClientCommand, ClientQuery, CoreEvent, CoreResponse};

use log::debug;
use tokio::sync::{broadcast, mpsc, oneshot};

pub(crate) type Reply = oneshot::Sender<Result<CoreResponse, CoreError>>;

/// A request for the engine loop paired with the channel its answer goes back on.
#[derive(Debug)]
pub(crate) struct ReturnableMessage<D> {
    pub(crate) data: D,
    pub(crate) tx_return: Reply,
}

#[derive(Debug)]
pub(crate) enum Request {
    Command(ReturnableMessage<ClientCommand>),
    Query(ReturnableMessage<ClientQuery>),
}

/// Cloneable handle to a running [`Core`](crate::engine::Core).
///
/// Every call is an independent pending request; the engine answers them in
/// the order it dequeues them. There is no timeout: a stalled engine leaves
/// the caller waiting.
#[derive(Clone)]
pub struct CoreController {
    request_tx: mpsc::Sender<Request>,
    events: broadcast::Sender<CoreEvent>,
}

impl CoreController {
    pub(crate) fn new(
        request_tx: mpsc::Sender<Request>,
        events: broadcast::Sender<CoreEvent>,
    ) -> Self {
        Self { request_tx, events }
    }

    /// Execute a command and wait for its response.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Rejected`] if the engine refused the command
    /// - [`CoreError::Unavailable`] if the engine loop has stopped
    pub async fn command(&self, data: ClientCommand) -> Result<CoreResponse, CoreError> {
        debug!("Queueing command {}", data.key());
        let (tx_return, rx) = oneshot::channel();
        self.request_tx
            .send(Request::Command(ReturnableMessage { data, tx_return }))
            .await
            .map_err(|e| CoreError::unavailable(format!("Engine loop stopped: {e}")))?;

        rx.await
            .map_err(|e| CoreError::unavailable(format!("Engine dropped the reply: {e}")))?
    }

    /// Execute a query and wait for its response.
    ///
    /// # Errors
    ///
    /// Same as [`CoreController::command`].
    pub async fn query(&self, data: ClientQuery) -> Result<CoreResponse, CoreError> {
        debug!("Queueing query {}", data.key());
        let (tx_return, rx) = oneshot::channel();
        self.request_tx
            .send(Request::Query(ReturnableMessage { data, tx_return }))
            .await
            .map_err(|e| CoreError::unavailable(format!("Engine loop stopped: {e}")))?;

        rx.await
            .map_err(|e| CoreError::unavailable(format!("Engine dropped the reply: {e}")))?
    }

    /// Subscribe to every event the engine emits from now on.
    pub fn events(&self) -> broadcast::Receiver<CoreEvent> {
        self.events.subscribe()
    }
}
