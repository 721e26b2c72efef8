//! A rectangular text field drawn by the application and edited through the
//! native control.
//!
//! The field owns a [`TextInput`] session. Each frame the host calls
//! [`TextField::update`] with whether the field is being edited; the field
//! then mirrors the native text, enforces its line limits and moves the native
//! control to its caret so IME candidate windows follow it.

use textinput_core::{
    filter_single_line, ActivationCoordinator, LineLimits, LogicalPoint, NativeBridge, Rect,
    TextInput, TextRange,
};

use crate::text::{font_metrics, measure_text};

/// Height of a single-line field.
pub const FIELD_HEIGHT: f32 = 24.0;

const HORIZONTAL_PADDING: f32 = 4.0;
const DOT_OFFSET_X: f32 = 4.0;

pub struct TextField<B: NativeBridge> {
    bounds: Rect,
    line_limits: LineLimits,
    input: TextInput<B>,
}

impl<B: NativeBridge> TextField<B> {
    pub fn new(coordinator: &ActivationCoordinator<B>, bounds: Rect, line_limits: LineLimits) -> Self {
        Self {
            bounds,
            line_limits,
            input: TextInput::new(coordinator),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn line_limits(&self) -> LineLimits {
        self.line_limits
    }

    pub fn input(&self) -> &TextInput<B> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput<B> {
        &mut self.input
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn is_active(&self) -> bool {
        self.input.is_active()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn update(&mut self, is_editing: bool) {
        self.input.update(is_editing);
        if !is_editing {
            return;
        }

        if self.line_limits.is_single_line() {
            if let Some((text, selection)) =
                filter_single_line(self.input.text(), self.input.selection())
            {
                log::debug!("stripped line breaks from single-line field");
                self.input.set_text(text, selection.start, selection.end);
            }
        }

        let position = self.bounds.origin() + self.caret_offset() + padding() + dot_offset();
        self.input.set_position(position);
    }

    /// Offset of the caret from the top-left of the text area.
    ///
    /// The caret sits at the selection start.
    pub fn caret_offset(&self) -> LogicalPoint {
        let text = self.input.text();
        let caret = TextRange::cursor(self.input.selection_start()).clamp_to(text).start;
        let before = &text[..caret];
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_index = before.matches('\n').count();
        let x = measure_text(&text[line_start..caret]).width;
        let y = line_index as f32 * font_metrics().line_height;
        LogicalPoint::new(x.ceil(), y)
    }

    /// Caret rectangle in window coordinates, while the field is active.
    pub fn caret_rect(&self) -> Option<Rect> {
        if !self.is_active() {
            return None;
        }
        let top_left = self.bounds.origin() + padding() + self.caret_offset();
        Some(Rect::new(top_left.x, top_left.y, 1.0, font_metrics().line_height))
    }

    /// Where the first baseline of the text is drawn.
    pub fn text_origin(&self) -> LogicalPoint {
        self.bounds.origin() + padding() + dot_offset()
    }
}

fn padding() -> LogicalPoint {
    let line_height = font_metrics().line_height;
    LogicalPoint::new(HORIZONTAL_PADDING, ((FIELD_HEIGHT - line_height) / 2.0).floor())
}

fn dot_offset() -> LogicalPoint {
    LogicalPoint::new(DOT_OFFSET_X, font_metrics().ascent.ceil())
}

#[cfg(test)]
#[path = "tests/text_field_tests.rs"]
mod tests;
