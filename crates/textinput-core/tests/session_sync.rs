//! Session lifecycle tests against an in-memory native control.
//!
//! Each test drives `TextInput::update` frame by frame and plays the user's
//! part through a `FakeControlHandle`.

use textinput_core::{ActivationCoordinator, LogicalPoint, NativeRange, TextInput, TextRange};
use textinput_testing::{BridgeCall, FakeControlHandle, FakeNativeControl};

fn setup() -> (ActivationCoordinator<FakeNativeControl>, FakeControlHandle) {
    let control = FakeNativeControl::new();
    let handle = control.handle();
    (ActivationCoordinator::new(control), handle)
}

#[test]
fn activation_prefills_the_control() {
    let (coordinator, control) = setup();
    let mut input = TextInput::with_text(&coordinator, "prefilled", TextRange::cursor(9));

    input.update(true);

    assert!(input.is_active());
    assert!(control.is_attached());
    assert_eq!(control.text(), "prefilled");
    assert_eq!(control.selection(), NativeRange::new(9, 9));
}

#[test]
fn typing_is_mirrored_each_frame() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);

    control.type_text("héllo");
    input.update(true);

    assert_eq!(input.text(), "héllo");
    assert_eq!(input.selection(), TextRange::cursor(6));
}

#[test]
fn set_text_on_active_session_reaches_the_control() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);

    input.set_text("ab", 0, 2);

    assert_eq!(control.text(), "ab");
    assert_eq!(control.selection(), NativeRange::new(0, 2));
    input.update(true);
    assert_eq!(input.selection(), TextRange::new(0, 2));
}

#[test]
fn set_text_on_inactive_session_stays_local() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);

    input.set_text("local", 1, 3);

    assert_eq!(input.text(), "local");
    assert_eq!(input.selection_start(), 1);
    assert_eq!(input.selection_end(), 3);
    assert!(control.calls().is_empty());
}

#[test]
fn deactivation_freezes_state() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);
    input.set_text("hello", 5, 5);
    input.update(false);

    control.replace_all("hello!", NativeRange::new(6, 6));
    input.update(false);

    assert!(!input.is_active());
    assert_eq!(input.text(), "hello");
    assert_eq!(input.selection(), TextRange::cursor(5));
    assert!(!control.is_attached());
}

#[test]
fn repeated_updates_attach_and_detach_once() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);

    input.update(true);
    input.update(true);
    input.update(false);
    input.update(false);

    assert_eq!(control.attach_count(), 1);
    assert_eq!(control.detach_count(), 1);
    assert_eq!(coordinator.active_count(), 0);
}

#[test]
fn last_activation_in_a_frame_wins() {
    let (coordinator, control) = setup();
    let mut first = TextInput::with_text(&coordinator, "first", TextRange::cursor(5));
    let mut second = TextInput::with_text(&coordinator, "second", TextRange::cursor(6));

    first.update(true);
    second.update(true);

    assert!(!first.is_active());
    assert!(second.is_active());
    assert_eq!(control.text(), "second");
    assert_eq!(control.attach_count(), 1);

    // both keep asking; the displaced one must not clobber the control
    control.type_text("!");
    first.update(true);
    second.update(true);

    assert!(!first.is_active());
    assert!(second.is_active());
    assert_eq!(first.text(), "first");
    assert_eq!(second.text(), "second!");
    assert_eq!(coordinator.active_count(), 1);
}

#[test]
fn displaced_session_takes_over_once_control_is_free() {
    let (coordinator, control) = setup();
    let mut first = TextInput::with_text(&coordinator, "first", TextRange::cursor(5));
    let mut second = TextInput::with_text(&coordinator, "second", TextRange::cursor(6));
    first.update(true);
    second.update(true);
    first.update(true);

    second.update(false);
    first.update(true);

    assert!(first.is_active());
    assert_eq!(control.text(), "first");
    assert_eq!(coordinator.active_count(), 1);
}

#[test]
fn switching_fields_keeps_the_control_attached() {
    let (coordinator, control) = setup();
    let mut first = TextInput::with_text(&coordinator, "one", TextRange::cursor(3));
    let mut second = TextInput::with_text(&coordinator, "two", TextRange::cursor(3));

    first.update(true);
    first.update(false);
    second.update(true);

    assert!(second.is_active());
    assert_eq!(control.text(), "two");
    assert_eq!(control.attach_count(), 2);
    assert_eq!(control.detach_count(), 1);
}

#[test]
fn dropping_an_active_session_detaches() {
    let (coordinator, control) = setup();
    {
        let mut input = TextInput::new(&coordinator);
        input.update(true);
        assert!(control.is_attached());
    }
    assert!(!control.is_attached());
    assert_eq!(coordinator.active_count(), 0);
}

#[test]
fn position_requested_while_inactive_applies_on_activation() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);

    input.set_position(LogicalPoint::new(12.0, 30.0));
    assert_eq!(control.position(), None);

    input.update(true);
    assert_eq!(control.position(), Some(LogicalPoint::new(12.0, 30.0)));
}

#[test]
fn position_forwards_every_frame_while_active() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);
    control.clear_calls();

    input.set_position(LogicalPoint::new(1.0, 2.0));
    input.set_position(LogicalPoint::new(3.0, 4.0));

    assert_eq!(
        control.calls(),
        vec![
            BridgeCall::SetPosition(LogicalPoint::new(1.0, 2.0)),
            BridgeCall::SetPosition(LogicalPoint::new(3.0, 4.0)),
        ]
    );
}

#[test]
fn reversed_selection_is_preserved() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);

    input.set_text("a😀bc", 6, 1);
    assert_eq!(control.selection(), NativeRange::new(4, 1));

    input.update(true);
    assert_eq!(input.selection(), TextRange::new(6, 1));
}

#[test]
fn reversed_selection_survives_forward_only_control() {
    let control = FakeNativeControl::new().without_selection_direction();
    let coordinator = ActivationCoordinator::new(control);
    let mut input = TextInput::new(&coordinator);
    input.update(true);

    input.set_text("abcdef", 5, 2);
    input.update(true);

    assert_eq!(input.selection(), TextRange::new(5, 2));
}

#[test]
fn non_bmp_selection_maps_to_byte_offsets() {
    let (coordinator, control) = setup();
    let mut input = TextInput::new(&coordinator);
    input.update(true);

    control.replace_all("𝄞 clef", NativeRange::new(2, 3));
    input.update(true);

    assert_eq!(input.selection(), TextRange::new(4, 5));
}

#[test]
fn resumes_from_control_when_focus_was_not_taken() {
    let (coordinator, control) = setup();
    let mut background = TextInput::with_text(&coordinator, "bg", TextRange::cursor(2));
    let mut input = TextInput::with_text(&coordinator, "draft", TextRange::cursor(5));
    background.update(true);
    input.update(true);

    control.type_text(" typed");
    input.update(false);
    input.update(true);

    assert_eq!(input.text(), "draft typed");
}

#[test]
fn clearing_control_does_not_leak_between_fields() {
    let control = FakeNativeControl::new().clearing_on_detach();
    let handle = control.handle();
    let coordinator = ActivationCoordinator::new(control);
    let mut first = TextInput::with_text(&coordinator, "secret", TextRange::cursor(6));
    let mut second = TextInput::new(&coordinator);

    first.update(true);
    first.update(false);
    second.update(true);
    second.update(true);

    assert_eq!(second.text(), "");
    assert_eq!(handle.text(), "");
    assert_eq!(first.text(), "secret");
}
