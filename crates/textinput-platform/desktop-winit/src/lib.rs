//! Desktop bridge on top of winit's IME support.
//!
//! winit has no native text control, so [`ImeEditor`] plays its part: it
//! holds the text and selection, applies committed IME text and key presses,
//! and reports the in-progress composition as part of the status.
//! [`WinitImeBridge`] is handed to the coordinator while [`WinitImeEvents`]
//! stays with the event loop and feeds it window events.

mod bridge;
mod editor;
mod keys;

pub use bridge::{ImeWindow, WinitImeBridge, WinitImeEvents};
pub use editor::{EditCommand, ImeEditor};
pub use keys::{clipboard_shortcut, edit_command, ClipboardShortcut};
