use textinput_core::{ClientPoint, ControlSettings, NativeRange};

/// Frame of the text view in its superview's bottom-up coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Places the control at a top-down client point inside a content view of
/// height `content_height`.
pub fn control_frame(settings: &ControlSettings, content_height: f64, at: ClientPoint) -> ControlFrame {
    ControlFrame {
        x: at.x,
        y: settings.flipped_origin_y(content_height, at.y),
        width: settings.frame_width,
        height: settings.frame_height,
    }
}

/// `NSRange` has no direction, so a reversed selection is written forward.
pub fn selection_to_range(selection: NativeRange) -> (usize, usize) {
    (selection.min(), selection.length())
}

pub fn range_to_selection(location: usize, length: usize) -> NativeRange {
    NativeRange::new(location, location + length)
}
