use std::sync::{OnceLock, PoisonError, RwLock};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    /// Number of lines in the text
    pub line_count: usize,
}

/// Vertical metrics of the face fields are drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Height of a single line of text
    pub line_height: f32,
    /// Distance from the top of a line to its baseline
    pub ascent: f32,
}

pub trait TextMeasurer: Send + Sync + 'static {
    fn measure(&self, text: &str) -> TextMetrics;

    fn font_metrics(&self) -> FontMetrics;
}

#[derive(Default)]
pub struct MonospacedTextMeasurer;

impl MonospacedTextMeasurer {
    pub const CHAR_WIDTH: f32 = 8.0;
    pub const LINE_HEIGHT: f32 = 16.0;
    pub const ASCENT: f32 = 12.0;
}

impl TextMeasurer for MonospacedTextMeasurer {
    fn measure(&self, text: &str) -> TextMetrics {
        let lines: Vec<&str> = text.split('\n').collect();
        let line_count = lines.len().max(1);

        // Width is the max width of any line
        let width = lines
            .iter()
            .map(|line| line.chars().count() as f32 * Self::CHAR_WIDTH)
            .fold(0.0_f32, f32::max);

        TextMetrics {
            width,
            height: line_count as f32 * Self::LINE_HEIGHT,
            line_count,
        }
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            line_height: Self::LINE_HEIGHT,
            ascent: Self::ASCENT,
        }
    }
}

fn global_text_measurer() -> &'static RwLock<Box<dyn TextMeasurer>> {
    static TEXT_MEASURER: OnceLock<RwLock<Box<dyn TextMeasurer>>> = OnceLock::new();
    TEXT_MEASURER.get_or_init(|| RwLock::new(Box::new(MonospacedTextMeasurer)))
}

/// Replaces the process-wide measurer used by text fields.
pub fn set_text_measurer<M: TextMeasurer>(measurer: M) {
    let mut guard = global_text_measurer()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Box::new(measurer);
}

pub fn measure_text(text: &str) -> TextMetrics {
    global_text_measurer()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .measure(text)
}

pub fn font_metrics() -> FontMetrics {
    global_text_measurer()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .font_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospaced_width_counts_chars_not_bytes() {
        let metrics = MonospacedTextMeasurer.measure("héllo");
        assert_eq!(metrics.width, 5.0 * MonospacedTextMeasurer::CHAR_WIDTH);
        assert_eq!(metrics.line_count, 1);
    }

    #[test]
    fn monospaced_uses_widest_line() {
        let metrics = MonospacedTextMeasurer.measure("ab\nabcd\n");
        assert_eq!(metrics.width, 4.0 * MonospacedTextMeasurer::CHAR_WIDTH);
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.height, 3.0 * MonospacedTextMeasurer::LINE_HEIGHT);
    }
}
