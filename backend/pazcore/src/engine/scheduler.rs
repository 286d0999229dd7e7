//! Per-reminder countdown tasks.
//!
//! Each scheduled reminder owns one tokio task that sleeps until its next
//! deadline, fires, and re-arms for another full period. A
//! `ReminderNewStatus` event goes out whenever a countdown (re)starts, so a
//! listener always knows how long until the next fire.

use crate::error::CoreError;
use crate::protocol::{CoreEvent, ReminderStatus};
use crate::state::ReminderState;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

type Deadline = Arc<Mutex<Instant>>;

/// Longest period, and longest single delay, a reminder may have: one year.
pub(crate) const MAX_WAIT_SEC: u64 = 365 * 24 * 60 * 60;

struct ScheduledReminder {
    wait_sec: u64,
    next_fire: Deadline,
    task: JoinHandle<()>,
}

pub(crate) struct ReminderScheduler {
    events: broadcast::Sender<CoreEvent>,
    jobs: HashMap<String, ScheduledReminder>,
}

impl ReminderScheduler {
    pub(crate) fn new(events: broadcast::Sender<CoreEvent>) -> Self {
        Self {
            events,
            jobs: HashMap::new(),
        }
    }

    /// Start (or restart) the countdown for `reminder` with a full period.
    pub(crate) fn schedule(&mut self, reminder: &ReminderState) -> Result<(), CoreError> {
        let period = Duration::from_secs(reminder.wait_sec);
        self.start(&reminder.id, reminder.wait_sec, period)
    }

    /// Reconcile running countdowns with `reminders`.
    ///
    /// Removed reminders stop, new ones start, reminders whose period changed
    /// restart. Untouched reminders keep their current countdown.
    pub(crate) fn resync(&mut self, reminders: &[ReminderState]) -> Result<(), CoreError> {
        let stale: Vec<String> = self
            .jobs
            .keys()
            .filter(|id| !reminders.iter().any(|r| &r.id == *id))
            .cloned()
            .collect();

        for id in stale {
            if let Some(job) = self.jobs.remove(&id) {
                job.task.abort();
                info!("Reminder {id} unscheduled");
            }
        }

        for reminder in reminders {
            match self.jobs.get(&reminder.id) {
                Some(job) if job.wait_sec == reminder.wait_sec => {}
                _ => self.schedule(reminder)?,
            }
        }
        Ok(())
    }

    /// Push the next fire of `id` back by `delay_sec` seconds.
    ///
    /// Rejected if `id` has no running countdown or the delay exceeds
    /// [`MAX_WAIT_SEC`]; the running countdown is left as it was.
    pub(crate) fn delay(&mut self, id: &str, delay_sec: u64) -> Result<(), CoreError> {
        let Some(job) = self.jobs.get(id) else {
            return Err(CoreError::rejected(format!(
                "No scheduled reminder with id '{id}'"
            )));
        };
        if delay_sec > MAX_WAIT_SEC {
            return Err(CoreError::rejected(format!(
                "Delay of {delay_sec}s for reminder '{id}' exceeds {MAX_WAIT_SEC}s"
            )));
        }

        let remaining = read_deadline(&job.next_fire).saturating_duration_since(Instant::now());
        let Some(first) = remaining.checked_add(Duration::from_secs(delay_sec)) else {
            return Err(CoreError::rejected(format!(
                "Delay of {delay_sec}s for reminder '{id}' is out of range"
            )));
        };

        let wait_sec = job.wait_sec;
        self.start(id, wait_sec, first)
    }

    /// Ids with a running countdown, sorted.
    pub(crate) fn running_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.jobs.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn start(&mut self, id: &str, wait_sec: u64, first: Duration) -> Result<(), CoreError> {
        let Some(deadline) = Instant::now().checked_add(first) else {
            return Err(CoreError::rejected(format!(
                "Reminder '{id}' would fire beyond the clock's range"
            )));
        };

        if let Some(previous) = self.jobs.remove(id) {
            previous.task.abort();
        }

        let period = Duration::from_secs(wait_sec);
        let next_fire: Deadline = Arc::new(Mutex::new(deadline));

        // Published before the task exists so the status precedes any fire.
        publish(&self.events, id, first);

        let task = tokio::spawn(countdown(
            id.to_string(),
            period,
            Arc::clone(&next_fire),
            self.events.clone(),
        ));

        info!("Reminder {id} scheduled: first fire in {first:?}, period {period:?}");
        self.jobs.insert(
            id.to_string(),
            ScheduledReminder {
                wait_sec,
                next_fire,
                task,
            },
        );
        Ok(())
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        for (_, job) in self.jobs.drain() {
            job.task.abort();
        }
    }
}

async fn countdown(
    id: String,
    period: Duration,
    next_fire: Deadline,
    events: broadcast::Sender<CoreEvent>,
) {
    loop {
        let deadline = read_deadline(&next_fire);
        sleep_until(deadline).await;
        info!("Reminder {id} fired");

        if period.is_zero() {
            warn!("Reminder {id} has a zero period, not re-arming");
            return;
        }

        let Some(next) = deadline.checked_add(period) else {
            warn!("Reminder {id} cannot re-arm past the clock's range");
            return;
        };
        match next_fire.lock() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
        publish(&events, &id, period);
    }
}

fn read_deadline(next_fire: &Deadline) -> Instant {
    match next_fire.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn publish(events: &broadcast::Sender<CoreEvent>, id: &str, until_next: Duration) {
    let next_duration_ms = i64::try_from(until_next.as_millis()).unwrap_or(i64::MAX);
    let event = CoreEvent::ReminderNewStatus(ReminderStatus::new(id, next_duration_ms));

    // No listeners is not an error: the UI may not have subscribed yet.
    if events.send(event).is_err() {
        debug!("Reminder {id} status dropped: no listeners");
    }
}
