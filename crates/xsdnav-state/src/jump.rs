//! # Jump Coordinator
//!
//! Process-wide single-slot protocol carrying "jump to path X" requests from
//! an initiator (the validation-error list) to a consumer (the explorer
//! session).
//!
//! ## States
//!
//! ```text
//!            request(p)                complete(p)
//!   Idle ───────────────► InFlight(p) ─────────────► Idle
//!                             │
//!                             │ request(q)  → rejected, no side effect
//!                             │ complete(q) → ignored (stale)
//! ```
//!
//! The slot and the subscriber list sit behind one `parking_lot::Mutex`, so
//! the check-then-set in [`JumpCoordinator::request`] and the broadcast that
//! follows it are a single step. Subscribers get an unbounded channel each;
//! a request is delivered to every subscriber alive at the time of the call.
//! The lock is never held across an `.await`.

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// State of the jump slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JumpState {
    /// No jump pending.
    #[default]
    Idle,
    /// A jump to the contained path was accepted and not yet completed.
    InFlight(String),
}

impl JumpState {
    /// The in-flight path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::InFlight(path) => Some(path),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    state: JumpState,
    subscribers: Vec<mpsc::UnboundedSender<String>>,
}

/// Serializes jump requests. Create one per application session and share it
/// behind an `Arc`.
#[derive(Debug, Default)]
pub struct JumpCoordinator {
    slot: Mutex<Slot>,
}

impl JumpCoordinator {
    /// An idle coordinator with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to occupy the slot with `path`.
    ///
    /// Returns `true` and notifies every subscriber when the slot was idle.
    /// Returns `false` without any side effect while another jump is in
    /// flight; the caller must not retry on its own.
    pub fn request(&self, path: impl Into<String>) -> bool {
        let path = path.into();
        let mut slot = self.slot.lock();

        if let JumpState::InFlight(current) = &slot.state {
            tracing::debug!(requested = %path, in_flight = %current, "jump rejected; slot busy");
            return false;
        }

        slot.state = JumpState::InFlight(path.clone());
        slot.subscribers.retain(|tx| tx.send(path.clone()).is_ok());
        tracing::debug!(path = %path, subscribers = slot.subscribers.len(), "jump requested");
        true
    }

    /// Path of the in-flight request, without changing state. Lets a consumer
    /// created after the request was issued pick it up.
    pub fn consume_pending_path(&self) -> Option<String> {
        self.slot.lock().state.path().map(str::to_string)
    }

    /// Release the slot if `path` is the in-flight path. A mismatched or
    /// repeated completion is ignored.
    pub fn complete(&self, path: &str) {
        let mut slot = self.slot.lock();
        if slot.state.path() == Some(path) {
            slot.state = JumpState::Idle;
            tracing::debug!(path, "jump completed");
        } else {
            tracing::trace!(path, "stale jump completion ignored");
        }
    }

    /// Whether exactly `path` is in flight.
    pub fn is_in_flight(&self, path: &str) -> bool {
        self.slot.lock().state.path() == Some(path)
    }

    /// Snapshot of the slot.
    pub fn state(&self) -> JumpState {
        self.slot.lock().state.clone()
    }

    /// Receive every request accepted from now on.
    pub fn subscribe(&self) -> JumpSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.slot.lock().subscribers.push(tx);
        JumpSubscription { rx }
    }

    /// Drop all subscribers. Their [`JumpSubscription::recv`] returns `None`
    /// once drained.
    pub fn clear_subscriptions(&self) {
        self.slot.lock().subscribers.clear();
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut slot = self.slot.lock();
        slot.subscribers.retain(|tx| !tx.is_closed());
        slot.subscribers.len()
    }
}

/// Receiving end of a [`JumpCoordinator::subscribe`] call. Dropping it
/// unsubscribes.
#[derive(Debug)]
pub struct JumpSubscription {
    rx: mpsc::UnboundedReceiver<String>,
}

impl JumpSubscription {
    /// Wait for the next requested path. `None` once the coordinator cleared
    /// its subscriptions or was dropped.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// The next requested path, if one is already queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
