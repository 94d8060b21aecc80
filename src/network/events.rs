//! Communication failure notifications
//!
//! Listeners are registered explicitly and called synchronously, on the
//! thread that hit the fault, in registration order.
//!
//! The registry lock is released before any listener runs, so a listener
//! may subscribe or unsubscribe on the notifier that is calling it.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};

use crate::error::MemcmdError;

/// Where in the send/receive cycle the transport failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Connect,
    Write,
    Read,
}

/// A transport fault on one endpoint
#[derive(Debug)]
pub struct CommunicationFailure {
    /// `host:port` of the socket that raised the failure
    pub endpoint: String,

    /// Step that failed
    pub stage: FailureStage,

    /// Underlying cause
    pub error: MemcmdError,
}

impl fmt::Display for CommunicationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "communication failure ({:?}) on {}: {}",
            self.stage, self.endpoint, self.error
        )
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Boxed failure callback
pub type FailureListener = Box<dyn FnMut(&CommunicationFailure) + Send>;

/// One registered listener. The reentrant lock serialises calls from
/// different threads; the `RefCell` catches a listener re-entering itself.
type ListenerSlot = Arc<ReentrantMutex<RefCell<FailureListener>>>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(SubscriptionId, ListenerSlot)>,
}

impl ListenerSet {
    fn contains(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|(existing, _)| *existing == id)
    }
}

/// Shared registry of failure listeners.
///
/// Clones share the same registry. Listeners removed while a notification
/// is in flight are not called for the rest of it; listeners added during
/// one are first called on the next.
#[derive(Clone, Default)]
pub struct FailureNotifier {
    inner: Arc<Mutex<ListenerSet>>,
}

impl FailureNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CommunicationFailure) + Send + 'static,
    {
        let mut set = self.inner.lock();
        let id = SubscriptionId(set.next_id);
        set.next_id += 1;
        let listener: FailureListener = Box::new(listener);
        set.listeners
            .push((id, Arc::new(ReentrantMutex::new(RefCell::new(listener)))));
        id
    }

    /// Remove a listener. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut set = self.inner.lock();
        let before = set.listeners.len();
        set.listeners.retain(|(existing, _)| *existing != id);
        set.listeners.len() != before
    }

    /// Deliver `failure` to every listener; returns how many were called.
    ///
    /// A listener that triggers a nested notification is skipped by it.
    pub fn notify(&self, failure: &CommunicationFailure) -> usize {
        let snapshot: Vec<(SubscriptionId, ListenerSlot)> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|(id, slot)| (*id, Arc::clone(slot)))
            .collect();

        let mut called = 0;
        for (id, slot) in snapshot {
            if !self.inner.lock().contains(id) {
                continue;
            }
            let guard = slot.lock();
            let mut listener = match guard.try_borrow_mut() {
                Ok(listener) => listener,
                Err(_) => continue,
            };
            (&mut *listener)(failure);
            called += 1;
        }
        called
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl fmt::Debug for FailureNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
