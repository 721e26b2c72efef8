use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use textinput_core::{ui_channel, UiDispatcher};

/// A background thread playing the host's UI thread.
///
/// It owns the [`UiQueue`](textinput_core::UiQueue) and drains it whenever it
/// is woken, so tests can drive sessions from the test thread and check that
/// bridge calls were marshaled. Stops and joins on drop.
pub struct UiThreadHarness {
    dispatcher: UiDispatcher,
    thread_id: ThreadId,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<usize>>,
}

impl UiThreadHarness {
    pub fn spawn() -> Self {
        let (ready_tx, ready_rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("textinput-ui".into())
            .spawn(move || {
                let ui_thread = thread::current();
                let (dispatcher, queue) = ui_channel(move || ui_thread.unpark());
                if ready_tx.send(dispatcher).is_err() {
                    return 0;
                }
                let mut ran = 0;
                while !stop_flag.load(Ordering::SeqCst) {
                    ran += queue.drain();
                    thread::park_timeout(Duration::from_millis(5));
                }
                ran + queue.drain()
            })
            .expect("failed to spawn UI thread");
        let dispatcher = ready_rx.recv().expect("UI thread exited during startup");
        Self {
            dispatcher,
            thread_id: handle.thread().id(),
            stop,
            handle: Some(handle),
        }
    }

    pub fn dispatcher(&self) -> UiDispatcher {
        self.dispatcher.clone()
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Stops the thread and returns how many jobs it ran.
    pub fn shutdown(mut self) -> usize {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> usize {
        self.stop.store(true, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => {
                handle.thread().unpark();
                handle.join().unwrap_or(0)
            }
            None => 0,
        }
    }
}

impl Drop for UiThreadHarness {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
