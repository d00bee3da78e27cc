//! Change notification plumbing
//!
//! Stores broadcast change events to any number of subscribers over std mpsc
//! channels. Consumers drain their feed synchronously; nothing here spawns
//! threads.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use super::LedgerChange;

/// Fan-out of events to every live subscriber
#[derive(Debug)]
pub struct ChangeNotifier<T> {
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push(tx);
        rx
    }

    /// Deliver an event, dropping subscribers whose receiver has gone away
    pub fn notify(&self, event: T) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|s| s.len())
            .unwrap_or_default()
    }
}

impl<T: Clone> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

type Drain = Box<dyn FnMut() -> Vec<LedgerChange> + Send>;

/// A subscriber's view of ledger changes, whatever the backend emits
pub struct ChangeFeed {
    drain: Drain,
}

impl ChangeFeed {
    /// Feed over a channel that already carries ledger changes
    pub fn from_receiver(rx: Receiver<LedgerChange>) -> Self {
        Self::mapped(rx, Some)
    }

    /// Feed over a backend-specific event channel
    ///
    /// Events mapping to `None` are not relevant to this ledger and are dropped.
    pub fn mapped<T, F>(rx: Receiver<T>, map: F) -> Self
    where
        T: Send + 'static,
        F: Fn(T) -> Option<LedgerChange> + Send + 'static,
    {
        Self {
            drain: Box::new(move || rx.try_iter().filter_map(&map).collect()),
        }
    }

    /// Changes received since the last call, without blocking
    pub fn pending(&mut self) -> Vec<LedgerChange> {
        (self.drain)()
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed").finish_non_exhaustive()
    }
}
