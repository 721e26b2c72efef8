use winit::keyboard::{Key, ModifiersState, NamedKey};

use crate::editor::EditCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardShortcut {
    Copy,
    Cut,
    Paste,
}

fn primary_modifier(modifiers: ModifiersState) -> bool {
    if cfg!(target_os = "macos") {
        modifiers.super_key()
    } else {
        modifiers.control_key()
    }
}

fn word_modifier(modifiers: ModifiersState) -> bool {
    if cfg!(target_os = "macos") {
        modifiers.alt_key()
    } else {
        modifiers.control_key()
    }
}

/// Maps a pressed key to an editing command. Plain characters are not
/// commands; they arrive as text.
pub fn edit_command(key: &Key, modifiers: ModifiersState) -> Option<EditCommand> {
    let extend = modifiers.shift_key();
    let word = word_modifier(modifiers);
    let primary = primary_modifier(modifiers);
    match key {
        Key::Named(named) => match named {
            NamedKey::Backspace => Some(EditCommand::Backspace),
            NamedKey::Delete => Some(EditCommand::Delete),
            NamedKey::Enter => Some(EditCommand::Newline),
            NamedKey::ArrowLeft => Some(EditCommand::Left { extend, word }),
            NamedKey::ArrowRight => Some(EditCommand::Right { extend, word }),
            NamedKey::ArrowUp if primary => Some(EditCommand::DocumentStart { extend }),
            NamedKey::ArrowDown if primary => Some(EditCommand::DocumentEnd { extend }),
            NamedKey::ArrowUp => Some(EditCommand::Up { extend }),
            NamedKey::ArrowDown => Some(EditCommand::Down { extend }),
            NamedKey::Home if modifiers.control_key() => Some(EditCommand::DocumentStart { extend }),
            NamedKey::End if modifiers.control_key() => Some(EditCommand::DocumentEnd { extend }),
            NamedKey::Home => Some(EditCommand::LineStart { extend }),
            NamedKey::End => Some(EditCommand::LineEnd { extend }),
            _ => None,
        },
        Key::Character(ch) if primary && ch.eq_ignore_ascii_case("a") => Some(EditCommand::SelectAll),
        _ => None,
    }
}

pub fn clipboard_shortcut(key: &Key, modifiers: ModifiersState) -> Option<ClipboardShortcut> {
    if !primary_modifier(modifiers) {
        return None;
    }
    let Key::Character(ch) = key else {
        return None;
    };
    match ch.to_lowercase().as_str() {
        "c" => Some(ClipboardShortcut::Copy),
        "x" => Some(ClipboardShortcut::Cut),
        "v" => Some(ClipboardShortcut::Paste),
        _ => None,
    }
}

/// Whether a key press carrying `text` should insert it.
pub(crate) fn inserts_text(text: &str, modifiers: ModifiersState) -> bool {
    !text.is_empty()
        && !primary_modifier(modifiers)
        && !text.chars().any(char::is_control)
}
