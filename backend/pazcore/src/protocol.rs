//! Protocol vocabulary shared between the UI and the core.
//!
//! Every request family is a closed, serde-tagged enum. Commands and queries
//! travel as `{ "key": K, "params": {...} }`, responses as
//! `{ "key": K, "data": ... }`, and events as `{ Variant: {...} }`.
//!
//! Adding an operation means adding a variant here. Dispatch in the engine and
//! event application in the bridge's store match exhaustively, so a new
//! variant is a compile error until every consumer handles it.

use crate::state::{ClientState, ReminderState};

use serde::{Deserialize, Serialize};

/// Host command name carrying a [`ClientCommand`].
pub const CLIENT_COMMAND: &str = "client_command";

/// Host command name carrying a [`ClientQuery`].
pub const CLIENT_QUERY: &str = "client_query";

/// Event name the core emits [`CoreEvent`]s under.
pub const CORE_EVENT: &str = "core_event";

/// Mutating operations the core performs on behalf of the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "params")]
pub enum ClientCommand {
    AddOne { value: i32 },
    Add { x: i32, y: i32 },
    /// Replace the full reminder set.
    SaveReminders { reminders: Vec<ReminderState> },
    NewReminder { reminder: ReminderState },
    /// Push a scheduled reminder's next fire back by `delay` seconds.
    DelayReminder { id: String, delay: u64 },
}

impl ClientCommand {
    pub fn key(&self) -> &'static str {
        match self {
            ClientCommand::AddOne { .. } => "AddOne",
            ClientCommand::Add { .. } => "Add",
            ClientCommand::SaveReminders { .. } => "SaveReminders",
            ClientCommand::NewReminder { .. } => "NewReminder",
            ClientCommand::DelayReminder { .. } => "DelayReminder",
        }
    }
}

/// Read-only requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "params")]
pub enum ClientQuery {
    ClientGetState,
    JobGetRunning,
}

impl ClientQuery {
    pub fn key(&self) -> &'static str {
        match self {
            ClientQuery::ClientGetState => "ClientGetState",
            ClientQuery::JobGetRunning => "JobGetRunning",
        }
    }
}

/// Answer to exactly one command or query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "data")]
pub enum CoreResponse {
    /// Acknowledgement without payload; `data` is `null` on the wire.
    Success(()),
    ClientGetState(ClientState),
    Sum(i32),
    /// Ids of the reminders that currently have a running schedule.
    RunningJobs(Vec<String>),
}

impl CoreResponse {
    pub fn key(&self) -> &'static str {
        match self {
            CoreResponse::Success(()) => "Success",
            CoreResponse::ClientGetState(_) => "ClientGetState",
            CoreResponse::Sum(_) => "Sum",
            CoreResponse::RunningJobs(_) => "RunningJobs",
        }
    }
}

/// Core-initiated notification. Never correlated with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreEvent {
    ReminderNewStatus(ReminderStatus),
}

impl CoreEvent {
    /// The stream this event belongs to. Each stream keeps one last-known value
    /// on the UI side.
    pub fn stream(&self) -> EventStream {
        match self {
            CoreEvent::ReminderNewStatus(_) => EventStream::ReminderStatus,
        }
    }
}

/// Identity of a distinct event stream, one per [`CoreEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStream {
    ReminderStatus,
}

/// Time until a reminder fires next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderStatus {
    pub id: String,
    pub next_duration_ms: i64,
}

impl ReminderStatus {
    pub fn new(id: impl Into<String>, next_duration_ms: i64) -> Self {
        Self {
            id: id.into(),
            next_duration_ms,
        }
    }

    /// Placeholder held before the first status arrives: empty id, negative
    /// duration.
    pub fn unset() -> Self {
        Self {
            id: String::new(),
            next_duration_ms: -1,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.id.is_empty() && self.next_duration_ms < 0
    }
}

impl Default for ReminderStatus {
    fn default() -> Self {
        Self::unset()
    }
}
