use super::*;
use textinput_core::NativeRange;

fn attached(text: &str, selection: TextRange) -> ImeEditor {
    let mut editor = ImeEditor::new();
    editor.attach();
    editor.set_status(&NativeStatus {
        text: text.to_owned(),
        selection: selection.to_native(text),
    });
    editor
}

#[test]
fn detached_editor_reports_empty_and_ignores_writes() {
    let mut editor = ImeEditor::new();
    editor.set_status(&NativeStatus::new("hello", 1, 1));
    editor.insert("x");
    assert_eq!(editor.status(), NativeStatus::empty());
    assert!(!editor.apply(EditCommand::SelectAll));
}

#[test]
fn detach_drops_content() {
    let mut editor = attached("hello", TextRange::cursor(5));
    editor.set_preedit("か", None);
    editor.detach();
    editor.attach();
    assert_eq!(editor.status(), NativeStatus::empty());
    assert!(!editor.is_composing());
}

#[test]
fn insert_replaces_selection() {
    let mut editor = attached("hello world", TextRange::new(6, 11));
    editor.insert("rust");
    assert_eq!(editor.text(), "hello rust");
    assert_eq!(editor.selection(), TextRange::cursor(10));
}

#[test]
fn status_uses_native_units() {
    let editor = attached("a😀b", TextRange::cursor(5));
    assert_eq!(editor.status().selection, NativeRange::new(3, 3));
}

#[test]
fn preedit_is_shown_at_the_caret_until_committed() {
    let mut editor = attached("ab", TextRange::cursor(1));
    editor.set_preedit("にほ", Some((3, 3)));
    let status = editor.status();
    assert_eq!(status.text, "aにほb");
    assert_eq!(status.selection, NativeRange::new(2, 2));
    assert_eq!(editor.text(), "ab");

    editor.commit("日本");
    assert!(!editor.is_composing());
    assert_eq!(editor.text(), "a日本b");
    assert_eq!(editor.selection(), TextRange::cursor(7));
}

#[test]
fn pushed_echo_keeps_the_composition() {
    let mut editor = attached("ab", TextRange::cursor(2));
    editor.set_preedit("c", None);
    let echoed = editor.status();
    assert_eq!(echoed, NativeStatus::new("abc", 3, 3));

    editor.set_status(&echoed);
    assert!(editor.is_composing());
    assert_eq!(editor.text(), "ab");
    assert_eq!(editor.status(), echoed);

    editor.commit("c");
    assert_eq!(editor.text(), "abc");
    assert_eq!(editor.selection(), TextRange::cursor(3));
}

#[test]
fn echo_is_cut_at_the_composition_not_an_earlier_match() {
    let mut editor = attached("cab", TextRange::cursor(3));
    editor.set_preedit("c", None);
    let echoed = editor.status();
    editor.set_status(&echoed);
    assert_eq!(editor.text(), "cab");

    editor.commit("c");
    assert_eq!(editor.text(), "cabc");
}

#[test]
fn replaced_composition_drops_its_commit() {
    let mut editor = attached("ab", TextRange::cursor(2));
    editor.set_preedit("c", None);
    editor.set_status(&NativeStatus::new("xyz", 1, 1));
    assert!(!editor.is_composing());
    assert_eq!(editor.text(), "xyz");

    editor.set_preedit("", None);
    editor.commit("c");
    assert_eq!(editor.text(), "xyz");
    assert_eq!(editor.selection(), TextRange::cursor(1));

    editor.commit("d");
    assert_eq!(editor.text(), "xdyz");
}

#[test]
fn empty_preedit_ends_composition() {
    let mut editor = attached("ab", TextRange::cursor(2));
    editor.set_preedit("x", None);
    editor.set_preedit("", None);
    assert_eq!(editor.status(), NativeStatus::new("ab", 2, 2));
}

#[test]
fn commands_are_ignored_while_composing() {
    let mut editor = attached("ab", TextRange::cursor(2));
    editor.set_preedit("x", None);
    assert!(!editor.apply(EditCommand::Backspace));
    assert_eq!(editor.text(), "ab");
}

#[test]
fn backspace_and_delete_remove_whole_characters() {
    let mut editor = attached("a😀b", TextRange::cursor(5));
    assert!(editor.apply(EditCommand::Backspace));
    assert_eq!(editor.text(), "ab");
    assert_eq!(editor.selection(), TextRange::cursor(1));

    let mut editor = attached("aé", TextRange::cursor(1));
    assert!(editor.apply(EditCommand::Delete));
    assert_eq!(editor.text(), "a");
}

#[test]
fn backspace_at_start_is_a_no_op() {
    let mut editor = attached("ab", TextRange::cursor(0));
    assert!(!editor.apply(EditCommand::Backspace));
    assert_eq!(editor.text(), "ab");
}

#[test]
fn shift_left_builds_a_reversed_selection() {
    let mut editor = attached("hello", TextRange::cursor(5));
    editor.apply(EditCommand::Left {
        extend: true,
        word: false,
    });
    editor.apply(EditCommand::Left {
        extend: true,
        word: false,
    });
    assert_eq!(editor.selection(), TextRange::new(5, 3));
    assert_eq!(editor.status().selection, NativeRange::new(5, 3));
}

#[test]
fn plain_arrow_collapses_selection_to_its_edge() {
    let mut editor = attached("hello", TextRange::new(4, 1));
    editor.apply(EditCommand::Right {
        extend: false,
        word: false,
    });
    assert_eq!(editor.selection(), TextRange::cursor(4));
}

#[test]
fn word_motion_skips_to_word_edges() {
    let mut editor = attached("one two three", TextRange::cursor(13));
    editor.apply(EditCommand::Left {
        extend: false,
        word: true,
    });
    assert_eq!(editor.selection(), TextRange::cursor(8));
    editor.apply(EditCommand::Left {
        extend: false,
        word: true,
    });
    assert_eq!(editor.selection(), TextRange::cursor(4));
    editor.apply(EditCommand::Right {
        extend: false,
        word: true,
    });
    assert_eq!(editor.selection(), TextRange::cursor(7));
}

#[test]
fn line_motion_stays_within_the_line() {
    let mut editor = attached("ab\ncdef\ng", TextRange::cursor(5));
    editor.apply(EditCommand::LineStart { extend: false });
    assert_eq!(editor.selection(), TextRange::cursor(3));
    editor.apply(EditCommand::LineEnd { extend: true });
    assert_eq!(editor.selection(), TextRange::new(3, 7));
}

#[test]
fn vertical_motion_keeps_column_where_it_fits() {
    let mut editor = attached("abcd\nxy\nlonger", TextRange::cursor(3));
    editor.apply(EditCommand::Down { extend: false });
    assert_eq!(editor.selection(), TextRange::cursor(7));
    editor.apply(EditCommand::Down { extend: false });
    assert_eq!(editor.selection(), TextRange::cursor(10));
    editor.apply(EditCommand::Down { extend: false });
    assert_eq!(editor.selection(), TextRange::cursor(14));
    editor.apply(EditCommand::Up { extend: false });
    assert_eq!(editor.selection(), TextRange::cursor(7));
}

#[test]
fn newline_and_select_all() {
    let mut editor = attached("ab", TextRange::cursor(1));
    editor.apply(EditCommand::Newline);
    assert_eq!(editor.text(), "a\nb");
    editor.apply(EditCommand::SelectAll);
    assert_eq!(editor.selected_text(), "a\nb");
}
