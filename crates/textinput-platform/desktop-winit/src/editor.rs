//! Editing buffer standing in for a native text control on platforms where
//! winit only exposes IME events.

use textinput_core::{NativeStatus, TextRange};

/// Editing operations produced by key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditCommand {
    Backspace,
    Delete,
    Newline,
    Left { extend: bool, word: bool },
    Right { extend: bool, word: bool },
    Up { extend: bool },
    Down { extend: bool },
    LineStart { extend: bool },
    LineEnd { extend: bool },
    DocumentStart { extend: bool },
    DocumentEnd { extend: bool },
    SelectAll,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Preedit {
    text: String,
    /// Cursor range inside `text`, in bytes.
    cursor: Option<(usize, usize)>,
}

/// Text, directional selection and in-progress IME composition.
#[derive(Clone, Debug, Default)]
pub struct ImeEditor {
    text: String,
    selection: TextRange,
    preedit: Option<Preedit>,
    /// Composition replaced by pushed text. A commit of the same text is
    /// dropped.
    superseded_commit: Option<String>,
    attached: bool,
}

impl ImeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Hides the control; composition and content are dropped.
    pub fn detach(&mut self) {
        self.attached = false;
        self.text.clear();
        self.selection = TextRange::zero();
        self.preedit = None;
        self.superseded_commit = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_composing(&self) -> bool {
        self.preedit.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    /// Text and selection as the session sees them, composition included.
    pub fn status(&self) -> NativeStatus {
        if !self.attached {
            return NativeStatus::empty();
        }
        let Some(preedit) = &self.preedit else {
            return NativeStatus {
                text: self.text.clone(),
                selection: self.selection.to_native(&self.text),
            };
        };
        let at = self.selection.min();
        let mut shown = String::with_capacity(self.text.len() + preedit.text.len());
        shown.push_str(&self.text[..at]);
        shown.push_str(&preedit.text);
        shown.push_str(&self.text[self.selection.max()..]);
        let selection = match preedit.cursor {
            Some((start, end)) => TextRange::new(at + start, at + end),
            None => TextRange::cursor(at + preedit.text.len()),
        };
        NativeStatus {
            selection: selection.clamp_to(&shown).to_native(&shown),
            text: shown,
        }
    }

    /// Replaces text and selection with a pushed status.
    ///
    /// Pushed text normally echoes the composition reported by [`status`].
    /// That copy is cut back out so the composition stays live and its
    /// commit lands once.
    ///
    /// [`status`]: Self::status
    pub fn set_status(&mut self, status: &NativeStatus) {
        if !self.attached {
            return;
        }
        if let Some(preedit) = self.preedit.take() {
            let near = self.selection.min();
            let found = status
                .text
                .match_indices(preedit.text.as_str())
                .map(|(at, _)| at)
                .min_by_key(|at| at.abs_diff(near));
            if let Some(at) = found {
                let mut text = status.text.clone();
                text.replace_range(at..at + preedit.text.len(), "");
                self.text = text;
                self.selection = TextRange::cursor(at);
                self.preedit = Some(preedit);
                return;
            }
            log::debug!("pushed text replaced the composition; its commit will be skipped");
            self.superseded_commit = Some(preedit.text);
        }
        self.text = status.text.clone();
        self.selection = status.selection.to_storage(&self.text);
    }

    /// Shows `text` as the composition at the caret. Empty text ends it.
    pub fn set_preedit(&mut self, text: &str, cursor: Option<(usize, usize)>) {
        if !self.attached {
            return;
        }
        self.preedit = if text.is_empty() {
            None
        } else {
            Some(Preedit {
                text: text.to_owned(),
                cursor,
            })
        };
    }

    pub fn commit(&mut self, text: &str) {
        self.preedit = None;
        if self.superseded_commit.take().is_some_and(|superseded| superseded == text) {
            return;
        }
        self.insert(text);
    }

    /// Replaces the selection with `text` and collapses the caret after it.
    pub fn insert(&mut self, text: &str) {
        if !self.attached {
            return;
        }
        let (start, end) = (self.selection.min(), self.selection.max());
        self.text.replace_range(start..end, text);
        self.selection = TextRange::cursor(start + text.len());
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selection.min()..self.selection.max()]
    }

    /// Applies `command`; returns whether the buffer changed.
    pub fn apply(&mut self, command: EditCommand) -> bool {
        if !self.attached || self.preedit.is_some() {
            return false;
        }
        let before = (self.selection, self.text.len());
        match command {
            EditCommand::Backspace => {
                if self.selection.collapsed() {
                    let caret = self.selection.end;
                    self.selection = TextRange::new(prev_boundary(&self.text, caret), caret);
                }
                self.insert("");
            }
            EditCommand::Delete => {
                if self.selection.collapsed() {
                    let caret = self.selection.end;
                    self.selection = TextRange::new(caret, next_boundary(&self.text, caret));
                }
                self.insert("");
            }
            EditCommand::Newline => self.insert("\n"),
            EditCommand::Left { extend, word } => {
                let sel = self.selection;
                let target = if word {
                    word_start(&self.text, sel.end)
                } else if !extend && !sel.collapsed() {
                    sel.min()
                } else {
                    prev_boundary(&self.text, sel.end)
                };
                self.move_caret(target, extend);
            }
            EditCommand::Right { extend, word } => {
                let sel = self.selection;
                let target = if word {
                    word_end(&self.text, sel.end)
                } else if !extend && !sel.collapsed() {
                    sel.max()
                } else {
                    next_boundary(&self.text, sel.end)
                };
                self.move_caret(target, extend);
            }
            EditCommand::Up { extend } => {
                let target = vertical_target(&self.text, self.selection.end, false);
                self.move_caret(target, extend);
            }
            EditCommand::Down { extend } => {
                let target = vertical_target(&self.text, self.selection.end, true);
                self.move_caret(target, extend);
            }
            EditCommand::LineStart { extend } => {
                let pos = self.selection.end;
                let line_start = self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                self.move_caret(line_start, extend);
            }
            EditCommand::LineEnd { extend } => {
                let pos = self.selection.end;
                let line_end = self.text[pos..]
                    .find('\n')
                    .map(|i| pos + i)
                    .unwrap_or(self.text.len());
                self.move_caret(line_end, extend);
            }
            EditCommand::DocumentStart { extend } => self.move_caret(0, extend),
            EditCommand::DocumentEnd { extend } => self.move_caret(self.text.len(), extend),
            EditCommand::SelectAll => self.selection = TextRange::all(self.text.len()),
        }
        before != (self.selection, self.text.len())
    }

    fn move_caret(&mut self, target: usize, extend: bool) {
        self.selection = if extend {
            TextRange::new(self.selection.start, target)
        } else {
            TextRange::cursor(target)
        };
    }
}

fn prev_boundary(text: &str, offset: usize) -> usize {
    text[..offset]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map(|ch| offset + ch.len_utf8())
        .unwrap_or(text.len())
}

fn word_start(text: &str, offset: usize) -> usize {
    let before = text[..offset].trim_end_matches(|c: char| !c.is_alphanumeric());
    before
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

fn word_end(text: &str, offset: usize) -> usize {
    let rest = &text[offset..];
    let skipped = rest.len() - rest.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let word = &rest[skipped..];
    let len = word.find(|c: char| !c.is_alphanumeric()).unwrap_or(word.len());
    offset + skipped + len
}

/// Caret target one line up or down, keeping the byte column where it fits.
fn vertical_target(text: &str, cursor: usize, down: bool) -> usize {
    let line_start = text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = cursor - line_start;
    let target = if down {
        let line_end = text[cursor..]
            .find('\n')
            .map(|i| cursor + i)
            .unwrap_or(text.len());
        if line_end >= text.len() {
            return text.len();
        }
        let next_start = line_end + 1;
        let next_end = text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(text.len());
        next_start + column.min(next_end - next_start)
    } else {
        if line_start == 0 {
            return 0;
        }
        let prev_end = line_start - 1;
        let prev_start = text[..prev_end].rfind('\n').map(|i| i + 1).unwrap_or(0);
        prev_start + column.min(prev_end - prev_start)
    };
    textinput_core::clamp_to_char_boundary(text, target)
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
