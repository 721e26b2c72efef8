//! Custom-drawn text fields whose editing is delegated to the native control.

pub mod text;
pub mod text_field;

pub use text::{
    font_metrics, measure_text, set_text_measurer, FontMetrics, MonospacedTextMeasurer,
    TextMeasurer, TextMetrics,
};
pub use text_field::{TextField, FIELD_HEIGHT};
