//! Hand-off of native control calls onto the UI affinity thread.
//!
//! Most OS text controls may only be touched from the thread that owns the
//! window. [`ui_channel`] is created on that thread; the host keeps the
//! [`UiQueue`] and drains it every loop iteration, while any thread can use the
//! cloneable [`UiDispatcher`] to run a closure there and wait for its result.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, ThreadId};

use crate::bridge::{NativeBridge, NativeStatus};
use crate::geometry::LogicalPoint;
use crate::platform::UiWaker;

type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Why a marshaled call did not produce a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The UI thread dropped its queue.
    Disconnected,
    /// The job was discarded before it ran.
    Abandoned,
    /// The job panicked on the UI thread.
    Panicked,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Disconnected => write!(f, "UI thread queue disconnected"),
            DispatchError::Abandoned => write!(f, "UI job dropped before running"),
            DispatchError::Panicked => write!(f, "UI job panicked"),
        }
    }
}

impl std::error::Error for DispatchError {}

struct DispatcherInner {
    waker: Arc<dyn UiWaker>,
    tx: mpsc::Sender<UiJob>,
    pending: AtomicUsize,
    ui_thread: ThreadId,
}

impl DispatcherInner {
    fn post(&self, job: UiJob) -> Result<(), DispatchError> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(DispatchError::Disconnected);
        }
        self.waker.wake();
        Ok(())
    }
}

struct PendingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        Self { counter }
    }
}

impl<'a> Drop for PendingGuard<'a> {
    fn drop(&mut self) {
        let previous = self.counter.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "UI dispatcher pending count underflowed");
    }
}

/// Creates a dispatcher bound to the calling thread and the queue that
/// thread must drain.
pub fn ui_channel(waker: impl UiWaker + 'static) -> (UiDispatcher, UiQueue) {
    let (tx, rx) = mpsc::channel();
    let inner = Arc::new(DispatcherInner {
        waker: Arc::new(waker),
        tx,
        pending: AtomicUsize::new(0),
        ui_thread: thread::current().id(),
    });
    (
        UiDispatcher {
            inner: Arc::clone(&inner),
        },
        UiQueue { rx, inner },
    )
}

#[derive(Clone)]
pub struct UiDispatcher {
    inner: Arc<DispatcherInner>,
}

impl UiDispatcher {
    /// Whether the caller is already on the UI thread.
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.inner.ui_thread
    }

    /// Runs `job` on the UI thread and blocks until it returns.
    ///
    /// Runs inline when called from the UI thread itself, so a host that
    /// drives everything from its event loop never waits on itself.
    pub fn run_blocking<R, F>(&self, job: F) -> Result<R, DispatchError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_ui_thread() {
            return panic::catch_unwind(AssertUnwindSafe(job)).map_err(|_| DispatchError::Panicked);
        }
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.inner.post(Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(job));
            let _ = reply_tx.send(result);
        }))?;
        match reply_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(DispatchError::Panicked),
            Err(_) => Err(DispatchError::Abandoned),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.inner.pending.load(Ordering::SeqCst) > 0
    }
}

/// Receiving end of a [`UiDispatcher`], owned by the UI thread.
pub struct UiQueue {
    rx: mpsc::Receiver<UiJob>,
    inner: Arc<DispatcherInner>,
}

impl UiQueue {
    /// Runs every job posted so far. Returns how many ran.
    pub fn drain(&self) -> usize {
        debug_assert_eq!(
            thread::current().id(),
            self.inner.ui_thread,
            "UiQueue drained off the UI thread"
        );
        let mut ran = 0;
        for job in self.rx.try_iter() {
            let _guard = PendingGuard::new(&self.inner.pending);
            job();
            ran += 1;
        }
        ran
    }

    pub fn dispatcher(&self) -> UiDispatcher {
        UiDispatcher {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Drop for UiQueue {
    // Jobs left behind are dropped unrun; their callers see `Abandoned`.
    fn drop(&mut self) {
        let mut dropped = 0;
        for job in self.rx.try_iter() {
            let _guard = PendingGuard::new(&self.inner.pending);
            drop(job);
            dropped += 1;
        }
        if dropped > 0 {
            log::debug!("UI queue dropped with {dropped} jobs pending");
        }
    }
}

/// Runs every operation of a `Send` bridge on the UI thread.
///
/// For bridges whose handles can cross threads but whose OS calls cannot.
pub struct ThreadAffineBridge<B> {
    inner: Arc<Mutex<B>>,
    dispatcher: UiDispatcher,
}

impl<B> ThreadAffineBridge<B>
where
    B: NativeBridge + Send + 'static,
{
    pub fn new(bridge: B, dispatcher: UiDispatcher) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bridge)),
            dispatcher,
        }
    }

    fn call<R>(&self, op: &'static str, f: impl FnOnce(&mut B) -> R + Send + 'static) -> Option<R>
    where
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let result = self.dispatcher.run_blocking(move || {
            let mut bridge = inner.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut bridge)
        });
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("native {op} skipped: {err}");
                None
            }
        }
    }
}

impl<B> NativeBridge for ThreadAffineBridge<B>
where
    B: NativeBridge + Send + 'static,
{
    fn attach(&mut self) {
        self.call("attach", |bridge| bridge.attach());
    }

    fn detach(&mut self) {
        self.call("detach", |bridge| bridge.detach());
    }

    fn set_position(&mut self, position: LogicalPoint) {
        self.call("set_position", move |bridge| bridge.set_position(position));
    }

    fn status(&mut self) -> NativeStatus {
        self.call("status", |bridge| bridge.status())
            .unwrap_or_default()
    }

    fn set_status(&mut self, status: &NativeStatus) {
        let status = status.clone();
        self.call("set_status", move |bridge| bridge.set_status(&status));
    }

    fn is_attached(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_attached()
    }
}

#[cfg(test)]
#[path = "tests/affinity_tests.rs"]
mod tests;
