//! # NavbarForm Component
//!
//! The editor form: logo file path, preview line, logo text, button text and
//! the submit line. Follows the persistent state + transient wrapper pattern:
//! the three `TextField`s live in `TuiState`, `NavbarForm` is created each
//! frame with borrowed state and the draft as props.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::draft::{DraftState, FormMode, LogoPreview};
use crate::core::preview::{describe_data_uri, format_size};
use crate::tui::component::Component;
use crate::tui::components::text_field::TextField;

/// Rows the form needs: 3 fields (3 each) + preview + submit line + borders.
pub const FORM_HEIGHT: u16 = 3 * 3 + 1 + 1 + 2;

pub struct NavbarForm<'a> {
    pub draft: &'a DraftState,
    pub logo_path: &'a mut TextField,
    pub logo_text: &'a mut TextField,
    pub button_text: &'a mut TextField,
    pub submitting: bool,
}

/// One line describing the logo the form would show.
pub fn preview_line(preview: &LogoPreview<'_>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    match preview {
        LogoPreview::None => Line::from(Span::styled("No logo selected", dim)),
        LogoPreview::Local(file) => Line::from(vec![
            Span::styled("New logo: ", Style::default().fg(Color::Green)),
            Span::raw(format!(
                "{} ({}, {})",
                file.file_name,
                file.content_type,
                format_size(file.preview.byte_len())
            )),
        ]),
        LogoPreview::Remote(uri) => {
            let detail = match describe_data_uri(uri) {
                Some(info) => format!("{}, {}", info.content_type, format_size(info.byte_len)),
                None => truncate_str(uri, 60),
            };
            Line::from(vec![
                Span::styled("Current logo: ", Style::default().fg(Color::Cyan)),
                Span::raw(detail),
            ])
        }
    }
}

/// Truncate to `max` chars, appending "..." when cut.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

impl Component for NavbarForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.draft.mode() {
            FormMode::Create => " Upload Navbar Details ".to_string(),
            FormMode::Edit(id) => format!(" Edit Navbar Details ({}) ", truncate_str(&id, 24)),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(Color::Gray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        use Constraint::Length;
        let [path_area, preview_area, logo_area, button_area, submit_area] =
            Layout::vertical([Length(3), Length(1), Length(3), Length(3), Length(1)])
                .areas(inner);

        self.logo_path.render(frame, path_area);
        frame.render_widget(
            Paragraph::new(preview_line(&self.draft.preview())),
            preview_area,
        );
        self.logo_text.render(frame, logo_area);
        self.button_text.render(frame, button_area);

        let label = if self.submitting {
            "Saving...".to_string()
        } else {
            match self.draft.mode() {
                FormMode::Create => "[ Submit ]  Ctrl+S".to_string(),
                FormMode::Edit(_) => "[ Update ]  Ctrl+S".to_string(),
            }
        };
        let submit = Paragraph::new(Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(submit, submit_area);
    }
}
