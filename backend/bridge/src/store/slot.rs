use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

/// Whether a slot still holds its placeholder.
///
/// The only transition is `Unset -> Known`, on the first update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unset,
    Known,
}

/// One reactive value. Readers either copy the current value or hold a
/// `watch::Receiver` that wakes on every replacement.
pub(crate) struct Slot<T> {
    value: watch::Sender<T>,
    known: AtomicBool,
}

impl<T: Clone> Slot<T> {
    pub(crate) fn new(placeholder: T) -> Self {
        let (value, _) = watch::channel(placeholder);
        Self {
            value,
            known: AtomicBool::new(false),
        }
    }

    pub(crate) fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    pub(crate) fn state(&self) -> SlotState {
        if self.known.load(Ordering::Acquire) {
            SlotState::Known
        } else {
            SlotState::Unset
        }
    }

    /// Replace the value wholesale, waking every watcher.
    ///
    /// The slot reads `Known` before any watcher is woken, and a reader that
    /// sees `Known` gets the new value from [`Slot::get`].
    pub(crate) fn replace(&self, next: T) {
        self.value.send_modify(|value| {
            self.known.store(true, Ordering::Release);
            *value = next;
        });
    }
}
