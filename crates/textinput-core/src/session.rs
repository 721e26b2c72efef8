//! Per-field text input session.
//!
//! A [`TextInput`] mirrors the shared native control while its field is
//! focused and keeps a frozen copy of the text and selection otherwise. The
//! application calls [`TextInput::update`] once per frame with whether the
//! field should receive native input.

use crate::bridge::{NativeBridge, NativeStatus};
use crate::coordinator::{ActivationCoordinator, SessionId};
use crate::geometry::LogicalPoint;
use crate::range::TextRange;

/// Text and selection of one logical field, synchronized with the native
/// control while active.
///
/// Offsets are UTF-8 byte offsets into [`text`](Self::text). A selection
/// whose start is after its end is a reversed selection and is kept as is.
pub struct TextInput<B: NativeBridge> {
    coordinator: ActivationCoordinator<B>,
    id: SessionId,
    text: String,
    selection: TextRange,
    claimed: bool,
    yielded: bool,
    pending_position: Option<LogicalPoint>,
}

impl<B: NativeBridge> TextInput<B> {
    /// Creates an inactive session with empty text.
    pub fn new(coordinator: &ActivationCoordinator<B>) -> Self {
        Self::with_text(coordinator, String::new(), TextRange::zero())
    }

    /// Creates an inactive session pre-filled with `text`.
    pub fn with_text(
        coordinator: &ActivationCoordinator<B>,
        text: impl Into<String>,
        selection: TextRange,
    ) -> Self {
        let text = text.into();
        let selection = selection.clamp_to(&text);
        Self {
            coordinator: coordinator.clone(),
            id: coordinator.register(),
            text,
            selection,
            claimed: false,
            yielded: false,
            pending_position: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Advances the session by one frame.
    ///
    /// - inactive, `true`: claims the native control, pushing the local text
    ///   and selection into it (or resuming from it if this session still
    ///   owned it)
    /// - active, `true`: pulls the control's text and selection
    /// - active, `false`: releases the control; local state is kept
    /// - inactive, `false`: nothing
    ///
    /// A session displaced by a later activation releases its count on the
    /// next update and does not take the control back while another session
    /// holds it, until it is updated with `false` once.
    pub fn update(&mut self, want_active: bool) {
        if self.claimed && !self.coordinator.is_focused(self.id) {
            log::debug!("session {} was displaced from native text control", self.id);
            self.coordinator.release(self.id);
            self.claimed = false;
            self.yielded = want_active;
            return;
        }
        if !want_active {
            self.yielded = false;
        }

        match (self.claimed, want_active) {
            (false, true) if self.yielded && self.coordinator.has_focus_holder() => {}
            (false, true) => {
                self.yielded = false;
                self.activate();
            }
            (true, true) => self.refresh(),
            (true, false) => self.deactivate(),
            (false, false) => {}
        }
    }

    /// Replaces the local text and selection, pushing them to the native
    /// control when this session owns it.
    pub fn set_text(&mut self, text: impl Into<String>, selection_start: usize, selection_end: usize) {
        self.text = text.into();
        self.selection = TextRange::new(selection_start, selection_end).clamp_to(&self.text);
        if self.claimed {
            let status = self.native_status();
            self.coordinator.push(self.id, &status);
        }
    }

    /// Moves the native control to the caret at `position`.
    ///
    /// While inactive the position is remembered and applied on the next
    /// activation.
    pub fn set_position(&mut self, position: LogicalPoint) {
        if self.claimed && self.coordinator.move_caret(self.id, position) {
            self.pending_position = None;
        } else {
            self.pending_position = Some(position);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn selection_start(&self) -> usize {
        self.selection.start
    }

    pub fn selection_end(&self) -> usize {
        self.selection.end
    }

    /// Whether this session currently owns the native control.
    ///
    /// Turns `false` as soon as another session claims the control.
    pub fn is_active(&self) -> bool {
        self.claimed && self.coordinator.is_focused(self.id)
    }

    fn activate(&mut self) {
        let local = self.native_status();
        if let Some(status) = self.coordinator.claim(self.id, &local) {
            self.apply_native(status);
        }
        self.claimed = true;
        if let Some(position) = self.pending_position.take() {
            self.coordinator.move_caret(self.id, position);
        }
    }

    fn refresh(&mut self) {
        if let Some(status) = self.coordinator.poll(self.id) {
            self.apply_native(status);
        }
    }

    fn deactivate(&mut self) {
        self.coordinator.release(self.id);
        self.claimed = false;
    }

    fn native_status(&self) -> NativeStatus {
        NativeStatus {
            text: self.text.clone(),
            selection: self.selection.to_native(&self.text),
        }
    }

    fn apply_native(&mut self, status: NativeStatus) {
        let selection = status.selection.to_storage(&status.text);
        // controls without a selection direction report ranges forward
        if status.text != self.text || !selection.same_span(&self.selection) {
            self.selection = selection;
        }
        if status.text != self.text {
            log::trace!("session {} text now {} bytes", self.id, status.text.len());
            self.text = status.text;
        }
    }
}

impl<B: NativeBridge> Drop for TextInput<B> {
    fn drop(&mut self) {
        if self.claimed {
            self.coordinator.release(self.id);
        }
    }
}

impl<B: NativeBridge> std::fmt::Debug for TextInput<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInput")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("selection", &self.selection)
            .field("claimed", &self.claimed)
            .finish()
    }
}
