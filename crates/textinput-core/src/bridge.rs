//! The contract every platform's native text control implements.

use crate::geometry::LogicalPoint;
use crate::range::NativeRange;

/// Snapshot of the native control's text and selection.
///
/// The selection is in native UTF-16 code units of `text`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeStatus {
    pub text: String,
    pub selection: NativeRange,
}

impl NativeStatus {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            selection: NativeRange::new(start, end),
        }
    }

    /// Empty text with a caret at zero; what a missing control reports.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Operations on the single shared OS text-editing control.
///
/// Implementations marshal onto the UI affinity thread where required and
/// block until the call completes. None of the operations fail: a missing or
/// detached control reads as empty and ignores writes.
pub trait NativeBridge {
    /// Shows the control and gives it keyboard focus. Idempotent.
    fn attach(&mut self);

    /// Hides the control and drops any composition in progress. Idempotent.
    fn detach(&mut self);

    /// Moves the control so IME candidate windows appear near the caret.
    fn set_position(&mut self, position: LogicalPoint);

    /// Returns the control's current text and selection.
    fn status(&mut self) -> NativeStatus;

    /// Overwrites the control's text and selection.
    fn set_status(&mut self, status: &NativeStatus);

    /// Whether the control is currently shown.
    fn is_attached(&self) -> bool;
}

impl<B: NativeBridge + ?Sized> NativeBridge for Box<B> {
    fn attach(&mut self) {
        (**self).attach()
    }

    fn detach(&mut self) {
        (**self).detach()
    }

    fn set_position(&mut self, position: LogicalPoint) {
        (**self).set_position(position)
    }

    fn status(&mut self) -> NativeStatus {
        (**self).status()
    }

    fn set_status(&mut self, status: &NativeStatus) {
        (**self).set_status(status)
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }
}

/// Bridge for targets without a native text facility.
#[derive(Debug, Default)]
pub struct NullBridge {
    attached: bool,
}

impl NullBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NativeBridge for NullBridge {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn set_position(&mut self, _position: LogicalPoint) {}

    fn status(&mut self) -> NativeStatus {
        NativeStatus::empty()
    }

    fn set_status(&mut self, _status: &NativeStatus) {}

    fn is_attached(&self) -> bool {
        self.attached
    }
}
