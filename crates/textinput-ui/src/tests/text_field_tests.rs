use super::*;
use crate::MonospacedTextMeasurer;
use textinput_core::NativeRange;
use textinput_testing::{FakeControlHandle, FakeNativeControl};

const CHAR: f32 = MonospacedTextMeasurer::CHAR_WIDTH;
const LINE: f32 = MonospacedTextMeasurer::LINE_HEIGHT;

fn setup() -> (ActivationCoordinator<FakeNativeControl>, FakeControlHandle) {
    let control = FakeNativeControl::new();
    let handle = control.handle();
    (ActivationCoordinator::new(control), handle)
}

fn single_line(coordinator: &ActivationCoordinator<FakeNativeControl>) -> TextField<FakeNativeControl> {
    TextField::new(
        coordinator,
        Rect::new(16.0, 16.0, 608.0, FIELD_HEIGHT),
        LineLimits::SingleLine,
    )
}

#[test]
fn single_line_field_strips_typed_newlines() {
    let (coordinator, control) = setup();
    let mut field = single_line(&coordinator);
    field.update(true);

    control.type_text("a\nb");
    control.select(0, 3);
    field.update(true);

    assert_eq!(field.text(), "ab");
    assert_eq!(field.input().selection(), TextRange::new(0, 2));
    assert_eq!(control.text(), "ab");
    assert_eq!(control.selection(), NativeRange::new(0, 2));
}

#[test]
fn multi_line_field_keeps_newlines() {
    let (coordinator, control) = setup();
    let mut field = TextField::new(
        &coordinator,
        Rect::new(16.0, 80.0, 608.0, 384.0),
        LineLimits::MultiLine,
    );
    field.update(true);

    control.type_text("one\ntwo");
    field.update(true);

    assert_eq!(field.text(), "one\ntwo");
}

#[test]
fn caret_follows_last_line() {
    let (coordinator, control) = setup();
    let mut field = TextField::new(
        &coordinator,
        Rect::new(0.0, 0.0, 200.0, 200.0),
        LineLimits::MultiLine,
    );
    field.update(true);

    control.type_text("abc\nxy");
    field.update(true);

    assert_eq!(field.caret_offset(), LogicalPoint::new(2.0 * CHAR, LINE));
}

#[test]
fn native_control_tracks_caret_position() {
    let (coordinator, control) = setup();
    let mut field = single_line(&coordinator);
    field.update(true);

    control.type_text("héllo");
    field.update(true);

    let padding_y = ((FIELD_HEIGHT - LINE) / 2.0).floor();
    let ascent = MonospacedTextMeasurer::ASCENT;
    let expected = LogicalPoint::new(
        16.0 + 5.0 * CHAR + 4.0 + 4.0,
        16.0 + padding_y + ascent,
    );
    assert_eq!(control.position(), Some(expected));
}

#[test]
fn idle_field_does_not_touch_the_control() {
    let (coordinator, control) = setup();
    let mut field = single_line(&coordinator);

    field.update(false);
    field.update(false);

    assert!(control.calls().is_empty());
    assert!(field.caret_rect().is_none());
}

#[test]
fn clicking_another_field_moves_editing() {
    let (coordinator, control) = setup();
    let mut fields = vec![
        single_line(&coordinator),
        TextField::new(
            &coordinator,
            Rect::new(16.0, 48.0, 608.0, FIELD_HEIGHT),
            LineLimits::SingleLine,
        ),
    ];

    let mut editing = fields.iter().position(|f| f.contains(20.0, 20.0));
    for (index, field) in fields.iter_mut().enumerate() {
        field.update(editing == Some(index));
    }
    control.type_text("first");
    for (index, field) in fields.iter_mut().enumerate() {
        field.update(editing == Some(index));
    }

    editing = fields.iter().position(|f| f.contains(20.0, 50.0));
    for (index, field) in fields.iter_mut().enumerate() {
        field.update(editing == Some(index));
    }

    assert_eq!(editing, Some(1));
    assert!(!fields[0].is_active());
    assert!(fields[1].is_active());
    assert_eq!(fields[0].text(), "first");
    assert_eq!(control.text(), "");
}
