//! Configuration shared by the platform bridges.

/// Geometry and behavior of the hidden native control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSettings {
    /// Width of the control in points (macOS) or IME cursor area (desktop).
    pub frame_width: f64,
    /// Height of the control, see `frame_width`.
    pub frame_height: f64,
    /// Distance from the caret position down to the text baseline.
    pub baseline_offset: f64,
    /// Keep Tab inside the control instead of moving browser focus.
    pub trap_tab: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            frame_width: 100.0,
            frame_height: 10.0,
            baseline_offset: 4.0,
            trap_tab: true,
        }
    }
}

impl ControlSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_size(mut self, width: f64, height: f64) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn with_baseline_offset(mut self, offset: f64) -> Self {
        self.baseline_offset = offset;
        self
    }

    pub fn with_tab_trapping(mut self, trap_tab: bool) -> Self {
        self.trap_tab = trap_tab;
        self
    }

    /// Converts a y coordinate measured from the top of a view of height
    /// `view_height` into one measured from its bottom, for the control's
    /// frame origin.
    pub fn flipped_origin_y(&self, view_height: f64, y: f64) -> f64 {
        view_height - y - self.frame_height - self.baseline_offset
    }
}
