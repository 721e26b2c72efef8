use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use textinput_core::{
    to_storage_bytes, LogicalPoint, NativeBridge, NativeRange, NativeStatus,
};

/// One call made through [`NativeBridge`] on a [`FakeNativeControl`].
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeCall {
    Attach,
    Detach,
    SetPosition(LogicalPoint),
    Status,
    SetStatus(NativeStatus),
}

#[derive(Default)]
struct FakeState {
    attached: bool,
    text: String,
    selection: NativeRange,
    position: Option<LogicalPoint>,
    calls: Vec<(BridgeCall, ThreadId)>,
    clear_on_detach: bool,
    forward_only: bool,
}

impl FakeState {
    fn record(&mut self, call: BridgeCall) {
        self.calls.push((call, thread::current().id()));
    }

    fn replace_selection(&mut self, inserted: &str) {
        let start = to_storage_bytes(&self.text, self.selection.min());
        let end = to_storage_bytes(&self.text, self.selection.max());
        self.text.replace_range(start..end, inserted);
        let caret = self.selection.min() + inserted.encode_utf16().count();
        self.selection = NativeRange::new(caret, caret);
    }
}

/// In-memory stand-in for the OS text control.
///
/// Behaves like a real control: selection offsets are UTF-16 code units,
/// reads while detached return empty status and writes while detached are
/// dropped. Keep a [`FakeControlHandle`] to play the user's part (typing,
/// selecting) and to inspect the calls the session made.
pub struct FakeNativeControl {
    state: Arc<Mutex<FakeState>>,
}

impl FakeNativeControl {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    /// Empties the text on detach, like a DOM `<textarea>` bridge.
    pub fn clearing_on_detach(self) -> Self {
        lock(&self.state).clear_on_detach = true;
        self
    }

    /// Reports every selection forward, like `NSRange`.
    pub fn without_selection_direction(self) -> Self {
        lock(&self.state).forward_only = true;
        self
    }

    pub fn handle(&self) -> FakeControlHandle {
        FakeControlHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for FakeNativeControl {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(state: &Mutex<FakeState>) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NativeBridge for FakeNativeControl {
    fn attach(&mut self) {
        let mut state = lock(&self.state);
        state.record(BridgeCall::Attach);
        state.attached = true;
    }

    fn detach(&mut self) {
        let mut state = lock(&self.state);
        state.record(BridgeCall::Detach);
        state.attached = false;
        if state.clear_on_detach {
            state.text.clear();
            state.selection = NativeRange::default();
        }
    }

    fn set_position(&mut self, position: LogicalPoint) {
        let mut state = lock(&self.state);
        state.record(BridgeCall::SetPosition(position));
        if state.attached {
            state.position = Some(position);
        }
    }

    fn status(&mut self) -> NativeStatus {
        let mut state = lock(&self.state);
        state.record(BridgeCall::Status);
        if !state.attached {
            return NativeStatus::empty();
        }
        let selection = if state.forward_only {
            NativeRange::new(state.selection.min(), state.selection.max())
        } else {
            state.selection
        };
        NativeStatus {
            text: state.text.clone(),
            selection,
        }
    }

    fn set_status(&mut self, status: &NativeStatus) {
        let mut state = lock(&self.state);
        state.record(BridgeCall::SetStatus(status.clone()));
        if !state.attached {
            return;
        }
        state.text = status.text.clone();
        state.selection = status.selection;
    }

    fn is_attached(&self) -> bool {
        lock(&self.state).attached
    }
}

/// Test-side view of a [`FakeNativeControl`].
#[derive(Clone)]
pub struct FakeControlHandle {
    state: Arc<Mutex<FakeState>>,
}

impl FakeControlHandle {
    pub fn is_attached(&self) -> bool {
        lock(&self.state).attached
    }

    pub fn text(&self) -> String {
        lock(&self.state).text.clone()
    }

    pub fn selection(&self) -> NativeRange {
        lock(&self.state).selection
    }

    pub fn position(&self) -> Option<LogicalPoint> {
        lock(&self.state).position
    }

    /// Types `text` over the current selection, leaving the caret after it.
    pub fn type_text(&self, text: &str) {
        lock(&self.state).replace_selection(text);
    }

    /// Deletes the selection, or the code point before the caret.
    pub fn backspace(&self) {
        let mut state = lock(&self.state);
        if state.selection.length() == 0 {
            let caret = state.selection.end;
            let before = to_storage_bytes(&state.text, caret);
            let Some(ch) = state.text[..before].chars().next_back() else {
                return;
            };
            state.selection = NativeRange::new(caret - ch.len_utf16(), caret);
        }
        state.replace_selection("");
    }

    /// Selects native units `start..end`; `start > end` selects backward.
    pub fn select(&self, start: usize, end: usize) {
        lock(&self.state).selection = NativeRange::new(start, end);
    }

    /// Replaces the whole content, e.g. an IME committing a full rewrite.
    pub fn replace_all(&self, text: &str, selection: NativeRange) {
        let mut state = lock(&self.state);
        state.text = text.to_owned();
        state.selection = selection;
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        lock(&self.state)
            .calls
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    /// Threads on which each recorded call ran, in call order.
    pub fn call_threads(&self) -> Vec<ThreadId> {
        lock(&self.state)
            .calls
            .iter()
            .map(|(_, thread)| *thread)
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&BridgeCall) -> bool) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|(call, _)| matches(call))
            .count()
    }

    pub fn attach_count(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::Attach))
    }

    pub fn detach_count(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::Detach))
    }

    pub fn clear_calls(&self) {
        lock(&self.state).calls.clear();
    }
}
