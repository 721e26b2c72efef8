//! macOS bridge: a hidden `NSTextView` in the main window's content view
//! receives keyboard and IME input.
//!
//! AppKit objects may only be touched on the main thread. Every operation
//! goes through a [`UiDispatcher`](textinput_core::UiDispatcher) created on
//! the main thread, so sessions can be driven from a game or render thread.

mod frame;

#[cfg(target_os = "macos")]
mod text_view;

pub use frame::{control_frame, range_to_selection, selection_to_range, ControlFrame};

#[cfg(target_os = "macos")]
pub use text_view::CocoaTextViewBridge;
