//! UI-side bridge to the Paz core.
//!
//! The bridge ships typed commands and queries across the process boundary,
//! hands back the core's typed responses, and keeps a reactive cache of the
//! core's state fed by core events.
//!
//! # Layers
//!
//! - [`boundary`]: the call/listen primitive the host runtime provides. The
//!   bridge only consumes it; [`boundary::LocalBoundary`] is an in-process
//!   implementation over a [`pazcore::CoreController`].
//! - [`transport`]: stateless mediator. One boundary call per command or query,
//!   one listener per subscription. Never touches the store.
//! - [`store`]: last-known `ClientState` plus one slot per event stream.
//! - [`Bridge`]: the single context object an application creates at startup
//!   and passes to whatever needs it.
//!
//! # Consistency
//!
//! Responses and events update the store independently. A consumer can see a
//! state that has not yet absorbed a command it already got a response for;
//! re-query with [`Bridge::refresh`] when that matters.

pub mod boundary;
pub mod context;
pub mod error;
pub mod store;
pub mod transport;

#[cfg(test)]
mod tests;

pub use boundary::{Boundary, EventCallback, InvokePayload, LocalBoundary, Unlisten};
pub use context::Bridge;
pub use error::{BoundaryError, BridgeError};
pub use store::{SlotState, StateStore};
pub use transport::{Subscription, Transport};
