use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{FORM_HEIGHT, NavbarForm, NavbarList, TitleBar};
use crate::tui::{Focus, TuiState};

/// Key hints for the bottom line, depending on focus.
pub fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::LogoPath => " Enter Load file (empty clears)  Tab Next  Ctrl+S Submit  Esc Quit ",
        Focus::LogoText | Focus::ButtonText => " Enter/Ctrl+S Submit  Tab Next  Ctrl+R Reload  Esc Quit ",
        Focus::List => " ↑↓ Select  e Edit  d Delete  r Reload  Tab Next  Esc Quit ",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(FORM_HEIGHT), Min(0), Length(1)]);
    let [title_area, form_area, list_area, help_area] = layout.areas(frame.area());

    TitleBar::new(&app.form_state(), &app.status_message, app.last_synced)
        .render(frame, title_area);

    tui.apply_focus();
    NavbarForm {
        draft: &app.draft,
        logo_path: &mut tui.logo_path,
        logo_text: &mut tui.logo_text,
        button_text: &mut tui.button_text,
        submitting: app.is_submitting(),
    }
    .render(frame, form_area);

    NavbarList {
        state: &mut tui.list,
        records: &app.records,
        has_loaded: app.has_loaded,
        editing_id: app.draft.editing_id.as_deref(),
    }
    .render(frame, list_area);

    frame.render_widget(
        Line::from(Span::styled(
            help_text(tui.focus),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        help_area,
    );
}
