//! # TextField Component
//!
//! Single-line input with a cursor. The field owns a copy of its text so it
//! can edit in place; the parent pushes `Changed` values into the core and
//! calls [`TextField::sync`] afterwards so the field always shows what the
//! draft actually holds (a reset or an edit seed overwrites it).

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The text changed; carries the full new value.
    Changed(String),
    /// Enter pressed.
    Submit,
}

pub struct TextField {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Whether this field has keyboard focus (Prop)
    pub focused: bool,
    value: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
}

impl TextField {
    pub fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            focused: false,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Adopts `value` if it differs from what the field shows. A replaced
    /// value puts the cursor at its end.
    pub fn sync(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.cursor = self.char_count();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> u16 {
        let prefix = &self.value[..self.byte_index(self.cursor)];
        prefix.width() as u16
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FieldEvent> {
        match event {
            TuiEvent::Submit => return Some(FieldEvent::Submit),
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                if flat.is_empty() {
                    return None;
                }
                self.insert(&flat);
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            TuiEvent::Delete => {
                if self.cursor >= self.char_count() {
                    return None;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            TuiEvent::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                return None;
            }
            TuiEvent::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                return None;
            }
            TuiEvent::Home => {
                self.cursor = 0;
                return None;
            }
            TuiEvent::End => {
                self.cursor = self.char_count();
                return None;
            }
            _ => return None,
        }
        Some(FieldEvent::Changed(self.value.clone()))
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(self.label)
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(2);
        let column = self.cursor_column();
        // Keep the cursor in view by scrolling horizontally
        let scroll_x = column.saturating_sub(inner_width.saturating_sub(1));

        let paragraph = if self.value.is_empty() {
            Paragraph::new(Span::styled(
                self.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Paragraph::new(self.value.as_str()).scroll((0, scroll_x))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && area.width > 2 && area.height > 2 {
            frame.set_cursor_position(Position::new(
                area.x + 1 + column - scroll_x,
                area.y + 1,
            ));
        }
    }
}
