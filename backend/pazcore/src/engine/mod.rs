//! The core engine.
//!
//! [`Core`] owns the authoritative [`ClientState`] and a reminder scheduler.
//! It runs as a single actor task: commands and queries arrive over an mpsc
//! channel, are executed one at a time, and are answered on the oneshot
//! channel that came with them. Events go out on a broadcast channel that
//! every [`CoreController`] can subscribe to.

mod controller;
pub(crate) mod scheduler;

pub use controller::CoreController;

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::protocol::{ClientCommand, ClientQuery, CoreEvent, CoreResponse};
use crate::state::{ClientState, ReminderState};

use controller::{Request, ReturnableMessage};
use scheduler::{MAX_WAIT_SEC, ReminderScheduler};

use std::collections::HashSet;

use log::{debug, info, warn};
use tokio::sync::{broadcast, mpsc};

pub struct Core {
    state: ClientState,
    scheduler: ReminderScheduler,
    request_rx: mpsc::Receiver<Request>,
}

impl Core {
    /// Build an engine and the first controller for it.
    ///
    /// The engine loop ends once every controller clone has been dropped.
    pub fn new(config: &CoreConfig) -> (Self, CoreController) {
        let (request_tx, request_rx) = mpsc::channel(config.request_capacity);
        let (events, _) = broadcast::channel::<CoreEvent>(config.event_capacity);

        let core = Self {
            state: ClientState::new(config.first_name.clone()),
            scheduler: ReminderScheduler::new(events.clone()),
            request_rx,
        };

        (core, CoreController::new(request_tx, events))
    }

    /// Build an engine and run it on the current tokio runtime.
    pub fn spawn(config: &CoreConfig) -> CoreController {
        let (core, controller) = Self::new(config);
        tokio::spawn(core.run());
        controller
    }

    /// The engine loop.
    pub async fn run(mut self) {
        info!("Core engine started");

        while let Some(request) = self.request_rx.recv().await {
            match request {
                Request::Command(ReturnableMessage { data, tx_return }) => {
                    let key = data.key();
                    let result = self.exec_command(data);
                    if let Err(ref e) = result {
                        warn!("Command {key} failed: {e}");
                    }
                    if tx_return.send(result).is_err() {
                        debug!("Command {key} caller went away before the reply");
                    }
                }
                Request::Query(ReturnableMessage { data, tx_return }) => {
                    let key = data.key();
                    let result = self.exec_query(data);
                    if tx_return.send(result).is_err() {
                        debug!("Query {key} caller went away before the reply");
                    }
                }
            }
        }

        info!("Core engine stopped: all controllers dropped");
    }

    fn exec_query(&self, query: ClientQuery) -> Result<CoreResponse, CoreError> {
        info!("Query: {}", query.key());
        Ok(match query {
            ClientQuery::ClientGetState => CoreResponse::ClientGetState(self.state.clone()),
            ClientQuery::JobGetRunning => CoreResponse::RunningJobs(self.scheduler.running_ids()),
        })
    }

    fn exec_command(&mut self, command: ClientCommand) -> Result<CoreResponse, CoreError> {
        info!("Command: {}", command.key());
        debug!("Command payload: {command:?}");
        Ok(match command {
            ClientCommand::AddOne { value } => {
                CoreResponse::Sum(checked_sum(value.checked_add(1), "AddOne")?)
            }
            ClientCommand::Add { x, y } => CoreResponse::Sum(checked_sum(x.checked_add(y), "Add")?),
            ClientCommand::SaveReminders { reminders } => self.save_reminders(reminders)?,
            ClientCommand::NewReminder { reminder } => self.new_reminder(reminder)?,
            ClientCommand::DelayReminder { id, delay } => {
                self.scheduler.delay(&id, delay)?;
                CoreResponse::Success(())
            }
        })
    }

    fn save_reminders(&mut self, reminders: Vec<ReminderState>) -> Result<CoreResponse, CoreError> {
        let mut seen = HashSet::new();
        for reminder in &reminders {
            validate_reminder(reminder)?;
            if !seen.insert(reminder.id.as_str()) {
                return Err(CoreError::rejected(format!(
                    "Duplicate reminder id '{}'",
                    reminder.id
                )));
            }
        }

        self.scheduler.resync(&reminders)?;
        self.state.reminders = reminders;
        info!("Saved {} reminders", self.state.reminders.len());
        Ok(CoreResponse::Success(()))
    }

    fn new_reminder(&mut self, reminder: ReminderState) -> Result<CoreResponse, CoreError> {
        validate_reminder(&reminder)?;
        if self.state.reminder(&reminder.id).is_some() {
            return Err(CoreError::rejected(format!(
                "Reminder '{}' already exists",
                reminder.id
            )));
        }

        self.scheduler.schedule(&reminder)?;
        self.state.reminders.push(reminder);
        Ok(CoreResponse::Success(()))
    }
}

#[track_caller]
fn checked_sum(sum: Option<i32>, op: &str) -> Result<i32, CoreError> {
    match sum {
        Some(value) => Ok(value),
        None => Err(CoreError::rejected(format!("{op} overflowed i32"))),
    }
}

fn validate_reminder(reminder: &ReminderState) -> Result<(), CoreError> {
    if reminder.id.is_empty() {
        return Err(CoreError::rejected("Reminder id cannot be empty"));
    }
    if reminder.wait_sec == 0 {
        return Err(CoreError::rejected(format!(
            "Reminder '{}' must wait at least one second",
            reminder.id
        )));
    }
    if reminder.wait_sec > MAX_WAIT_SEC {
        return Err(CoreError::rejected(format!(
            "Reminder '{}' waits {}s, more than {MAX_WAIT_SEC}s",
            reminder.id, reminder.wait_sec
        )));
    }
    Ok(())
}
