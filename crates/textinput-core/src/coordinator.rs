//! Reference-counted ownership of the single shared native control.
//!
//! Any number of [`TextInput`](crate::TextInput) sessions may be active, but
//! only one native control exists. The coordinator counts active sessions,
//! attaches the control when the count leaves zero and detaches it when the
//! count returns to zero. It also remembers which session claimed the control
//! last; only that session reads from or writes to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bridge::{NativeBridge, NativeStatus};
use crate::geometry::LogicalPoint;

/// Identifies one session registered with a coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Shared<B> {
    bridge: B,
    active_count: usize,
    focus: Option<SessionId>,
    next_id: u64,
}

impl<B: NativeBridge> Shared<B> {
    fn activate(&mut self) {
        if self.active_count == 0 {
            log::debug!("attaching native text control");
            self.bridge.attach();
        }
        self.active_count += 1;
    }

    fn deactivate(&mut self) {
        if self.active_count == 0 {
            log::debug!("deactivate with no active sessions ignored");
            return;
        }
        self.active_count -= 1;
        if self.active_count == 0 {
            log::debug!("detaching native text control");
            self.bridge.detach();
            self.focus = None;
        }
    }

    fn focused(&self, id: SessionId) -> bool {
        self.focus == Some(id)
    }
}

/// Cloneable handle to the shared control and its activation count.
pub struct ActivationCoordinator<B> {
    shared: Arc<Mutex<Shared<B>>>,
}

impl<B> Clone for ActivationCoordinator<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: NativeBridge> ActivationCoordinator<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                bridge,
                active_count: 0,
                focus: None,
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<B>> {
        self.shared.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!("text input coordinator lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Increments the active count, attaching the control on 0 -> 1.
    pub fn activate(&self) {
        self.lock().activate();
    }

    /// Decrements the active count, detaching the control on 1 -> 0.
    ///
    /// Never drops below zero.
    pub fn deactivate(&self) {
        self.lock().deactivate();
    }

    pub fn active_count(&self) -> usize {
        self.lock().active_count
    }

    pub fn is_attached(&self) -> bool {
        self.lock().bridge.is_attached()
    }

    /// Runs `f` with exclusive access to the bridge.
    pub fn with_bridge<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.lock().bridge)
    }

    pub(crate) fn register(&self) -> SessionId {
        let mut shared = self.lock();
        let id = SessionId(shared.next_id);
        shared.next_id += 1;
        id
    }

    /// Activates on behalf of `id` and makes it the focus holder.
    ///
    /// Returns the live status when `id` already held focus and the control
    /// stayed attached, so the session resumes from what the user typed.
    /// Otherwise pushes `local` into the control and returns `None`.
    pub(crate) fn claim(&self, id: SessionId, local: &NativeStatus) -> Option<NativeStatus> {
        let mut shared = self.lock();
        let resumed = shared.focused(id) && shared.active_count > 0;
        shared.activate();
        if let Some(previous) = shared.focus.replace(id) {
            if previous != id {
                log::debug!("session {id} takes native text control from {previous}");
            }
        }
        if resumed {
            log::debug!("session {id} resumes native text control");
            Some(shared.bridge.status())
        } else {
            shared.bridge.set_status(local);
            None
        }
    }

    pub(crate) fn release(&self, id: SessionId) {
        log::debug!("session {id} releases native text control");
        self.lock().deactivate();
    }

    pub fn is_focused(&self, id: SessionId) -> bool {
        self.lock().focused(id)
    }

    pub(crate) fn has_focus_holder(&self) -> bool {
        self.lock().focus.is_some()
    }

    pub(crate) fn poll(&self, id: SessionId) -> Option<NativeStatus> {
        let mut shared = self.lock();
        if !shared.focused(id) {
            return None;
        }
        Some(shared.bridge.status())
    }

    pub(crate) fn push(&self, id: SessionId, status: &NativeStatus) -> bool {
        let mut shared = self.lock();
        if !shared.focused(id) {
            return false;
        }
        shared.bridge.set_status(status);
        true
    }

    pub(crate) fn move_caret(&self, id: SessionId, position: LogicalPoint) -> bool {
        let mut shared = self.lock();
        if !shared.focused(id) {
            return false;
        }
        log::trace!("session {id} caret at ({}, {})", position.x, position.y);
        shared.bridge.set_position(position);
        true
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
