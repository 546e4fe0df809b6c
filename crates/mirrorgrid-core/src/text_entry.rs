//! Single-line text entry for the text the sketch pattern is derived from.
//!
//! The entry has no drawing of its own; the window backend shows its
//! content in the title bar.

use crate::messages::{Key, ModMask, Msg};

/// Actions returned by [`TextEntry::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEntryAction {
    /// No meaningful action.
    Pass,
    /// The text content or cursor changed.
    Change,
    /// The user confirmed the input.
    Confirm,
    /// The user cancelled the input.
    Cancel,
}

/// Editable text with a byte-offset cursor that always sits on a char
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    content: String,
    cursor: usize,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a char index.
    pub fn cursor(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }

    /// Process a key message. Keys held with Ctrl, Alt or Meta are left to
    /// the caller and yield [`TextEntryAction::Pass`].
    pub fn update(&mut self, msg: &Msg) -> TextEntryAction {
        let Msg::KeyDown { key, modifiers, .. } = msg else {
            return TextEntryAction::Pass;
        };
        if modifiers.contains(ModMask::CTRL)
            || modifiers.contains(ModMask::ALT)
            || modifiers.contains(ModMask::META)
        {
            return TextEntryAction::Pass;
        }

        match key {
            Key::Enter => TextEntryAction::Confirm,
            Key::Escape => TextEntryAction::Cancel,
            Key::Char(_) | Key::Space => {
                let ch = match key {
                    Key::Char(c) => *c,
                    _ => ' ',
                };
                self.content.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
                TextEntryAction::Change
            }
            Key::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.content.remove(prev);
                self.cursor = prev;
                TextEntryAction::Change
            }
            Key::Delete if self.cursor < self.content.len() => {
                self.content.remove(self.cursor);
                TextEntryAction::Change
            }
            Key::ArrowLeft if self.cursor > 0 => {
                self.cursor = self.prev_boundary();
                TextEntryAction::Change
            }
            Key::ArrowRight if self.cursor < self.content.len() => {
                self.cursor = self.next_boundary();
                TextEntryAction::Change
            }
            Key::Home if self.cursor > 0 => {
                self.cursor = 0;
                TextEntryAction::Change
            }
            Key::End if self.cursor < self.content.len() => {
                self.cursor = self.content.len();
                TextEntryAction::Change
            }
            _ => TextEntryAction::Pass,
        }
    }
}
