//! # TitleBar Component
//!
//! Top status bar: form mode, the latest status message, and when the list
//! was last synced.
//!
//! Stateless: it receives all data as props and has no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(&app.form_state(), &app.status_message, app.last_synced);
//! title_bar.render(frame, title_area);
//! ```

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::draft::FormMode;
use crate::core::state::FormState;
use crate::tui::component::Component;

pub struct TitleBar {
    pub mode_label: String,
    pub status_message: String,
    pub last_synced: Option<DateTime<Local>>,
}

/// "create", "editing", "saving update of 42", ...
pub fn mode_label(state: &FormState) -> String {
    let target = |mode: &FormMode| match mode {
        FormMode::Create => "new navbar".to_string(),
        FormMode::Edit(id) => format!("navbar {id}"),
    };
    match state {
        FormState::Idle(mode) => target(mode),
        FormState::Editing(mode) => format!("editing {}", target(mode)),
        FormState::Submitting(mode) => format!("saving {}", target(mode)),
    }
}

impl TitleBar {
    pub fn new(state: &FormState, status_message: &str, last_synced: Option<DateTime<Local>>) -> Self {
        Self {
            mode_label: mode_label(state),
            status_message: status_message.to_string(),
            last_synced,
        }
    }

    /// The plain text of the bar, without styling.
    pub fn text(&self) -> String {
        let mut parts = vec![format!("Navbar Admin ({})", self.mode_label)];
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if let Some(synced) = self.last_synced {
            parts.push(format!("synced {}", synced.format("%H:%M:%S")));
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
