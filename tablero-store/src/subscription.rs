//! Change notification relay.
//!
//! Translates raw backend notifications into flattened [`ChangeEvent`]s on
//! a spawned task and hands them to the subscriber callback. Type scoping
//! is pushed into the backend subscription, so the relay never sees rows
//! of other types.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tablero_model::FlatRecord;
use tokio::task::JoinHandle;

use crate::backend::{ChangeFeed, ChangeKind, RawChange};

/// A change notification in the flattened view.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// The record after the change. Absent for deletes.
    pub record: Option<FlatRecord>,
    /// The record before the change. Absent for inserts.
    pub previous: Option<FlatRecord>,
}

impl ChangeEvent {
    fn from_raw(raw: RawChange) -> Self {
        Self {
            kind: raw.kind,
            record: raw.row.map(FlatRecord::flatten),
            previous: raw.previous.map(FlatRecord::flatten),
        }
    }
}

/// Handle to a live change subscription.
///
/// `unsubscribe` may be called any number of times; the channel is
/// released on the first. Dropping the handle unsubscribes too. Releasing
/// handles on view teardown is the caller's obligation — the underlying
/// channel stays open until then.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub(crate) fn spawn<F>(mut feed: ChangeFeed, callback: F) -> Self
    where
        F: Fn(ChangeEvent) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let flag = active.clone();
        let task = tokio::spawn(async move {
            while let Some(raw) = feed.recv().await {
                callback(ChangeEvent::from_raw(raw));
            }
            flag.store(false, Ordering::SeqCst);
        });
        Self { task, active }
    }

    /// Whether the subscription is still delivering events.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && !self.task.is_finished()
    }

    /// Releases the subscription. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
