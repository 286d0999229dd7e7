//! Reactive cache of what the core last told us.
//!
//! One slot for the [`ClientState`] snapshot and one slot per
//! [`EventStream`]. Each slot holds exactly one value, replaced wholesale on
//! update; there is no history, no merge and no expiry. Slots update
//! independently, so two slots may briefly disagree with each other or with
//! the core.

mod slot;

pub use slot::SlotState;

use slot::Slot;

use pazcore::{ClientState, CoreEvent, CoreResponse, EventStream, ReminderStatus};

use log::debug;
use tokio::sync::watch;

pub struct StateStore {
    client_state: Slot<ClientState>,
    reminder_status: Slot<ReminderStatus>,
}

impl StateStore {
    /// Every slot starts at its placeholder: an empty `ClientState` and an
    /// unset reminder status.
    pub fn new() -> Self {
        Self {
            client_state: Slot::new(ClientState::default()),
            reminder_status: Slot::new(ReminderStatus::unset()),
        }
    }

    pub fn client_state(&self) -> ClientState {
        self.client_state.get()
    }

    pub fn watch_client_state(&self) -> watch::Receiver<ClientState> {
        self.client_state.watch()
    }

    pub fn client_state_slot(&self) -> SlotState {
        self.client_state.state()
    }

    pub fn reminder_status(&self) -> ReminderStatus {
        self.reminder_status.get()
    }

    pub fn watch_reminder_status(&self) -> watch::Receiver<ReminderStatus> {
        self.reminder_status.watch()
    }

    pub fn event_slot(&self, stream: EventStream) -> SlotState {
        match stream {
            EventStream::ReminderStatus => self.reminder_status.state(),
        }
    }

    /// Absorb a response. Only a `ClientGetState` response carries state;
    /// anything else leaves the store untouched.
    ///
    /// Returns `true` if a slot was replaced.
    pub fn apply_response(&self, response: &CoreResponse) -> bool {
        match response {
            CoreResponse::ClientGetState(state) => {
                self.client_state.replace(state.clone());
                debug!("Store: client state replaced");
                true
            }
            CoreResponse::Success(()) | CoreResponse::Sum(_) | CoreResponse::RunningJobs(_) => false,
        }
    }

    /// Absorb an event into its stream's slot.
    pub fn apply_event(&self, event: &CoreEvent) {
        match event {
            CoreEvent::ReminderNewStatus(status) => {
                self.reminder_status.replace(status.clone());
                debug!(
                    "Store: reminder status {} -> {}ms",
                    status.id, status.next_duration_ms
                );
            }
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
