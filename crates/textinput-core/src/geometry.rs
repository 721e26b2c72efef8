//! Points and rectangles in logical and client coordinate spaces.

use crate::platform::PositionMapper;

/// A point in the application's logical (device-independent) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LogicalPoint {
    pub x: f32,
    pub y: f32,
}

impl LogicalPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for LogicalPoint {
    type Output = LogicalPoint;

    fn add(self, rhs: LogicalPoint) -> LogicalPoint {
        LogicalPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A point in the host window's client area, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> LogicalPoint {
        LogicalPoint::new(self.x, self.y)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Maps logical points by multiplying with the device scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    scale_factor: f64,
}

impl ScaleFactor {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn get(&self) -> f64 {
        self.scale_factor
    }

    pub fn set(&mut self, factor: f64) {
        self.scale_factor = factor;
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PositionMapper for ScaleFactor {
    fn to_client(&self, point: LogicalPoint) -> ClientPoint {
        ClientPoint {
            x: point.x as f64 * self.scale_factor,
            y: point.y as f64 * self.scale_factor,
        }
    }
}

/// Passes logical points through unchanged.
///
/// Used where the native control is positioned in the same units as the
/// application, e.g. CSS pixels on the web or points in an AppKit view.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMapper;

impl PositionMapper for IdentityMapper {
    fn to_client(&self, point: LogicalPoint) -> ClientPoint {
        ClientPoint::new(point.x as f64, point.y as f64)
    }
}
