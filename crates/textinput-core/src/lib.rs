#![doc = r"Core of the native text input bridge: offset codec, activation and session sync."]

pub extern crate self as textinput_core;

pub mod affinity;
pub mod bridge;
pub mod codec;
pub mod coordinator;
pub mod geometry;
pub mod line_limits;
pub mod platform;
pub mod range;
pub mod session;
pub mod settings;

pub use affinity::{ui_channel, DispatchError, ThreadAffineBridge, UiDispatcher, UiQueue};
pub use bridge::{NativeBridge, NativeStatus, NullBridge};
pub use codec::{clamp_to_char_boundary, to_native_units, to_storage_bytes};
pub use coordinator::{ActivationCoordinator, SessionId};
pub use geometry::{ClientPoint, IdentityMapper, LogicalPoint, Rect, ScaleFactor};
pub use line_limits::{filter_single_line, LineLimits};
pub use platform::{PositionMapper, UiWaker};
pub use range::{NativeRange, TextRange};
pub use session::TextInput;
pub use settings::ControlSettings;
