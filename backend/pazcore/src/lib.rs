//! The Paz core: protocol vocabulary and the engine that answers it.
//!
//! - [`protocol`]: the closed command / query / response / event sets shared
//!   with every UI-side consumer.
//! - [`state`]: the authoritative client state the core owns.
//! - [`engine`]: the actor that executes commands and queries and schedules
//!   reminders.
//! - [`config`]: startup configuration for the engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::{Core, CoreController};
pub use config::CoreConfig;
pub use error::CoreError;
pub use protocol::{ClientCommand, ClientQuery, CoreEvent, CoreResponse, EventStream, ReminderStatus};
pub use state::{ClientState, ReminderState};
