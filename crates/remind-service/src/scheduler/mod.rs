//! In-memory job scheduler
//!
//! A time-ordered queue of (fire time, reminder id) entries driving the
//! executor. The queue is a rebuildable cache over the store: it is restored
//! on start from active reminders with a future `next_trigger` and is never
//! authoritative for whether a reminder fires (the executor re-checks
//! `is_active` on load).
//!
//! Cancellation is generation-based: every register/cancel bumps the
//! reminder's generation, and a popped entry whose stamp no longer matches
//! is discarded. Entries are never searched out of the heap.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::BinaryHeap;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use remind_core::entities::Reminder;

use crate::executor::ReminderExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    at: DateTime<Utc>,
    id: Uuid,
    generation: u64,
}

struct Inner {
    queue: Mutex<BinaryHeap<Reverse<Entry>>>,
    generations: DashMap<Uuid, u64>,
    wakeup: Notify,
}

/// Time-ordered job scheduler with cancel-by-id
#[derive(Clone)]
pub struct JobScheduler {
    inner: Arc<Inner>,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(BinaryHeap::new()),
                generations: DashMap::new(),
                wakeup: Notify::new(),
            }),
        }
    }

    /// Register (or re-register) a reminder to fire at `at`.
    ///
    /// A later registration supersedes any queued entry for the same id.
    pub fn register(&self, id: Uuid, at: DateTime<Utc>) {
        let generation = {
            let mut entry = self.inner.generations.entry(id).or_insert(0);
            *entry += 1;
            *entry
        };
        self.inner.queue.lock().push(Reverse(Entry { at, id, generation }));
        self.inner.wakeup.notify_one();
        debug!(reminder_id = %id, fire_at = %at, "Job registered");
    }

    /// Best-effort cancel: queued entries for `id` become stale and are
    /// discarded when popped.
    pub fn cancel(&self, id: Uuid) {
        if let Some(mut entry) = self.inner.generations.get_mut(&id) {
            *entry += 1;
            debug!(reminder_id = %id, "Job cancelled");
        }
    }

    /// Number of queued entries, stale ones included
    pub fn len(&self) -> usize {
        self.inner.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.queue.lock().is_empty()
    }

    /// Rebuild the queue from active reminders with a future schedule
    #[instrument(skip(self, reminders))]
    pub fn restore(&self, reminders: &[Reminder]) -> usize {
        let mut restored = 0;
        for reminder in reminders {
            if let Some(at) = reminder.next_trigger {
                self.register(reminder.id, at);
                restored += 1;
            }
        }
        info!(restored, "Scheduler restored from store");
        restored
    }

    /// Spawn the dispatch loop.
    ///
    /// Due jobs run as independent tasks; a panicking or failing job never
    /// blocks the loop or other jobs. Successful recurring executions
    /// re-register themselves through the outcome's re-arm time.
    pub fn start(&self, executor: Arc<ReminderExecutor>) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let mut due = Vec::new();
                let next_at = {
                    let mut queue = scheduler.inner.queue.lock();
                    while let Some(Reverse(head)) = queue.peek().copied() {
                        if head.at > now {
                            break;
                        }
                        queue.pop();
                        if scheduler.is_current(&head) {
                            due.push(head.id);
                        }
                    }
                    queue.peek().map(|Reverse(e)| e.at)
                };

                for id in due {
                    let executor = executor.clone();
                    let scheduler = scheduler.clone();
                    tokio::spawn(async move {
                        let outcome = executor.execute(id).await;
                        if let Some(at) = outcome.rearm() {
                            scheduler.register(id, at);
                        }
                    });
                }

                match next_at {
                    Some(at) => {
                        let wait = (at - Utc::now()).to_std().unwrap_or_default();
                        tokio::select! {
                            () = tokio::time::sleep(wait) => {}
                            () = scheduler.inner.wakeup.notified() => {}
                        }
                    }
                    None => scheduler.inner.wakeup.notified().await,
                }
            }
        })
    }

    fn is_current(&self, entry: &Entry) -> bool {
        self.inner
            .generations
            .get(&entry.id)
            .is_some_and(|g| *g == entry.generation)
    }

    /// Pop every due, still-current entry (test and sweep hook)
    pub fn take_due(&self, now: DateTime<Utc>) -> Vec<Uuid> {
        let mut due = Vec::new();
        let mut queue = self.inner.queue.lock();
        while let Some(Reverse(head)) = queue.peek().copied() {
            if head.at > now {
                break;
            }
            queue.pop();
            if self.is_current(&head) {
                due.push(head.id);
            }
        }
        due
    }
}
