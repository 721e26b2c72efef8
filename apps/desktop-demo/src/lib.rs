//! Three text fields sharing one native text input, as a windowing-agnostic
//! model the desktop and web entry points drive once per frame.

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

use textinput::{ActivationCoordinator, LineLimits, NativeBridge, Rect, TextField};

pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 480.0;
pub const TITLE: &str = "Text Input Demo";

const MARGIN: f32 = 16.0;

pub struct DemoFields<B: NativeBridge> {
    fields: Vec<TextField<B>>,
    focused: Option<usize>,
}

impl<B: NativeBridge> DemoFields<B> {
    /// Two single-line fields above one multi-line field filling the rest.
    pub fn new(coordinator: &ActivationCoordinator<B>) -> Self {
        let width = SCREEN_WIDTH - 2.0 * MARGIN;
        let fields = vec![
            TextField::new(
                coordinator,
                Rect::new(MARGIN, 16.0, width, textinput::FIELD_HEIGHT),
                LineLimits::SingleLine,
            ),
            TextField::new(
                coordinator,
                Rect::new(MARGIN, 48.0, width, textinput::FIELD_HEIGHT),
                LineLimits::SingleLine,
            ),
            TextField::new(
                coordinator,
                Rect::new(MARGIN, 80.0, width, SCREEN_HEIGHT - 80.0 - MARGIN),
                LineLimits::MultiLine,
            ),
        ];
        Self {
            fields,
            focused: None,
        }
    }

    pub fn fields(&self) -> &[TextField<B>] {
        &self.fields
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focuses the field under the pointer; clicking outside every field
    /// clears focus.
    pub fn click(&mut self, x: f32, y: f32) {
        self.focused = self.field_at(x, y);
        log::debug!("focus -> {:?}", self.focused);
    }

    pub fn field_at(&self, x: f32, y: f32) -> Option<usize> {
        self.fields.iter().position(|field| field.contains(x, y))
    }

    pub fn frame(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.update(self.focused == Some(i));
        }
    }

    /// One-line description of the focused field for a window title.
    pub fn summary(&self) -> String {
        let Some(index) = self.focused else {
            return format!("{TITLE} - click a field");
        };
        let input = self.fields[index].input();
        let line = input.text().lines().last().unwrap_or("");
        format!(
            "{TITLE} - field {} [{}..{}] {:?}",
            index + 1,
            input.selection_start(),
            input.selection_end(),
            line
        )
    }
}
