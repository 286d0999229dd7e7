use serde::{Deserialize, Serialize};

/// Authoritative application state held by the core.
///
/// The UI caches this verbatim; it never patches individual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub first_name: String,
    #[serde(default)]
    pub reminders: Vec<ReminderState>,
}

impl ClientState {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            reminders: Vec::new(),
        }
    }

    pub fn reminder(&self, id: &str) -> Option<&ReminderState> {
        self.reminders.iter().find(|r| r.id == id)
    }
}

/// A recurring reminder: fires every `wait_sec` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderState {
    pub id: String,
    pub name: String,
    pub wait_sec: u64,
}

impl ReminderState {
    pub fn new(id: impl Into<String>, name: impl Into<String>, wait_sec: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wait_sec,
        }
    }
}
