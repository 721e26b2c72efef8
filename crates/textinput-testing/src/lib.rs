//! Testing utilities for native text input sessions

pub mod fake_control;
pub mod ui_thread;

pub use fake_control::{BridgeCall, FakeControlHandle, FakeNativeControl};
pub use ui_thread::UiThreadHarness;

pub mod prelude {
    pub use crate::fake_control::*;
    pub use crate::ui_thread::*;
    pub use textinput_core::{
        ActivationCoordinator, LogicalPoint, NativeBridge, NativeRange, NativeStatus, TextInput,
        TextRange,
    };
}
