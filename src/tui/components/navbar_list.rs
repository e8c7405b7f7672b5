//! # NavbarList Component
//!
//! The fetched navbar records, one card per record, with edit and delete
//! actions on the selected one.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `NavbarListState` lives in `TuiState`
//! - `NavbarList` is created each frame with borrowed state and records

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::api::NavbarRecord;
use crate::core::draft::LogoPreview;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::navbar_form::{preview_line, truncate_str};
use crate::tui::event::TuiEvent;

pub const EMPTY_LIST_TEXT: &str = "No navbar items added yet.";

/// Persistent state for the record list.
pub struct NavbarListState {
    pub selected: usize,
    pub len: usize,
    pub focused: bool,
    pub list_state: ListState,
}

/// Events emitted by the record list. Indices refer to the record slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Edit(usize),
    Delete(usize),
    Reload,
}

impl NavbarListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            len: 0,
            focused: false,
            list_state: ListState::default(),
        }
    }

    /// Keeps the selection valid after the list was re-fetched.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

impl Default for NavbarListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for NavbarListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::InputChar('r') => return Some(ListEvent::Reload),
            _ if self.len == 0 => return None,
            TuiEvent::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            TuiEvent::Down => {
                self.selected = (self.selected + 1).min(self.len - 1);
            }
            TuiEvent::Home => self.selected = 0,
            TuiEvent::End => self.selected = self.len - 1,
            TuiEvent::Submit | TuiEvent::InputChar('e') => {
                return Some(ListEvent::Edit(self.selected));
            }
            TuiEvent::InputChar('d') | TuiEvent::Delete => {
                return Some(ListEvent::Delete(self.selected));
            }
            _ => return None,
        }
        self.list_state.select(Some(self.selected));
        None
    }
}

/// Transient render wrapper for the record list.
pub struct NavbarList<'a> {
    pub state: &'a mut NavbarListState,
    pub records: &'a [NavbarRecord],
    pub has_loaded: bool,
    pub editing_id: Option<&'a str>,
}

impl Component for NavbarList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.state.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(format!(" Navbar Items ({}) ", self.records.len()))
            .border_style(border_style);

        if self.records.is_empty() {
            let text = if self.has_loaded {
                EMPTY_LIST_TEXT
            } else {
                "Loading..."
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| {
                let editing = self.editing_id == Some(record.id.as_str());
                let marker = if editing { "✎ " } else { "  " };
                let logo = match record.logo.as_deref() {
                    Some(uri) => LogoPreview::Remote(uri),
                    None => LogoPreview::None,
                };
                let mut logo_line = preview_line(&logo);
                logo_line.spans.insert(0, Span::raw("  "));
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Yellow)),
                        Span::styled("Logo Text: ", Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(truncate_str(&record.logo_text, width.saturating_sub(13))),
                    ]),
                    Line::from(vec![
                        Span::raw("  Button Text: "),
                        Span::raw(truncate_str(&record.button_text, width.saturating_sub(15))),
                    ]),
                    logo_line,
                    Line::default(),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
