#![deny(missing_docs)]

//! Native text input for custom-drawn text fields.
//!
//! Applications draw their own fields and keep one [`TextInput`] per field.
//! Every frame each session is told whether its field should receive input;
//! the active one mirrors a single hidden native control, so typing,
//! composition and accessibility come from the operating system.
//!
//! The backend is chosen with Cargo features:
//!
//! - `desktop` (default): winit IME on Linux, Windows and macOS
//! - `macos`: a hidden `NSTextView`, preferred over `desktop` on macOS
//! - `web`: a hidden `<textarea>` on wasm32
//!
//! [`PlatformBridge`] names the selected backend.

#[cfg(not(any(feature = "desktop", feature = "web", feature = "macos")))]
compile_error!("textinput must be built with at least one of the `desktop`, `web` or `macos` features.");

pub use textinput_core::{
    clamp_to_char_boundary, filter_single_line, to_native_units, to_storage_bytes, ui_channel,
    ActivationCoordinator, ClientPoint, ControlSettings, DispatchError, IdentityMapper,
    LineLimits, LogicalPoint, NativeBridge, NativeRange, NativeStatus, NullBridge,
    PositionMapper, Rect, ScaleFactor, SessionId, TextInput, TextRange, ThreadAffineBridge,
    UiDispatcher, UiQueue, UiWaker,
};
pub use textinput_ui::{
    font_metrics, measure_text, set_text_measurer, FontMetrics, MonospacedTextMeasurer,
    TextField, TextMeasurer, TextMetrics, FIELD_HEIGHT,
};

/// Desktop backend on top of winit's IME.
#[cfg(feature = "desktop")]
pub mod desktop {
    pub use textinput_platform_desktop_winit::*;
}

/// Web backend using a hidden `<textarea>`.
#[cfg(feature = "web")]
pub mod web {
    pub use textinput_platform_web::*;
}

/// macOS backend using a hidden `NSTextView`.
#[cfg(feature = "macos")]
pub mod macos {
    pub use textinput_platform_macos::*;
}

/// The native bridge selected for this target.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformBridge = textinput_platform_web::WebTextareaBridge;

/// The native bridge selected for this target.
#[cfg(all(target_os = "macos", feature = "macos"))]
pub type PlatformBridge = textinput_platform_macos::CocoaTextViewBridge;

/// The native bridge selected for this target.
#[cfg(all(
    feature = "desktop",
    not(target_arch = "wasm32"),
    not(all(target_os = "macos", feature = "macos"))
))]
pub type PlatformBridge = textinput_platform_desktop_winit::WinitImeBridge;

/// No native control is available for this target; sessions still keep their
/// own text.
#[cfg(not(any(
    all(target_arch = "wasm32", feature = "web"),
    all(target_os = "macos", feature = "macos"),
    all(feature = "desktop", not(target_arch = "wasm32"))
)))]
pub type PlatformBridge = NullBridge;

/// Coordinator over the selected backend.
pub type PlatformCoordinator = ActivationCoordinator<PlatformBridge>;

/// Session over the selected backend.
pub type PlatformTextInput = TextInput<PlatformBridge>;

/// Commonly used items.
pub mod prelude {
    pub use crate::{PlatformBridge, PlatformCoordinator, PlatformTextInput};
    pub use textinput_core::{
        ActivationCoordinator, LineLimits, LogicalPoint, NativeBridge, Rect, TextInput, TextRange,
    };
    pub use textinput_ui::TextField;
}
