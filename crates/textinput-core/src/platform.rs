//! Host abstraction traits for the text input core.
//!
//! These traits let the core delegate waking the UI loop and coordinate
//! conversion to the host windowing layer, without depending on any
//! particular event loop or window type.

use crate::geometry::{ClientPoint, LogicalPoint};

/// Wakes the host UI loop.
///
/// Implementations are responsible for making the UI thread run a loop
/// iteration soon, so that it drains pending [`UiQueue`](crate::UiQueue)
/// jobs. They must be safe to use from multiple threads.
pub trait UiWaker: Send + Sync {
    /// Request that the host run a loop iteration on the UI thread.
    fn wake(&self);
}

/// Converts application coordinates into the client coordinates of the
/// window hosting the native control.
pub trait PositionMapper: Send + Sync {
    /// Maps a logical point to window client pixels.
    fn to_client(&self, point: LogicalPoint) -> ClientPoint;
}

impl<F> UiWaker for F
where
    F: Fn() + Send + Sync,
{
    fn wake(&self) {
        self()
    }
}
