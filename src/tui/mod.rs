//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders the form and the record list, and
//! translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` runs on this thread. Effects that need I/O are handed to
//! `core::perform` on a tokio task, which sends the resulting `Action` back
//! over a channel drained once per loop iteration. Task handles are kept so
//! in-flight requests are aborted on exit.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (loading or a write in flight): polls every ~80ms so the status
//!   updates promptly when the task reports back.
//! - **Idle**: sleeps up to 500ms, only redraws on events.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{HttpNavbarService, NavbarService};
use crate::core::action::{Action, Effect, LoadReason, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::sync::perform;
use crate::tui::component::EventHandler;
use crate::tui::components::{FieldEvent, ListEvent, NavbarListState, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    LogoPath,
    LogoText,
    ButtonText,
    List,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::LogoPath => Focus::LogoText,
            Focus::LogoText => Focus::ButtonText,
            Focus::ButtonText => Focus::List,
            Focus::List => Focus::LogoPath,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::LogoPath => Focus::List,
            Focus::LogoText => Focus::LogoPath,
            Focus::ButtonText => Focus::LogoText,
            Focus::List => Focus::ButtonText,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub logo_path: TextField,
    pub logo_text: TextField,
    pub button_text: TextField,
    pub list: NavbarListState,
    /// Whether the draft held a file at the last sync.
    had_file: bool,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::LogoText,
            logo_path: TextField::new(" Logo file ", "path/to/logo.png, Enter to load"),
            logo_text: TextField::new(" Logo Text ", "Enter logo text"),
            button_text: TextField::new(" Button Text ", "Enter button text"),
            list: NavbarListState::new(),
            had_file: false,
        }
    }

    /// Pulls the draft and list into the widgets after the core changed.
    pub fn sync_from(&mut self, app: &App) {
        self.logo_text.sync(&app.draft.logo_text);
        self.button_text.sync(&app.draft.button_text);
        let has_file = app.draft.selected_file.is_some();
        if self.had_file && !has_file {
            self.logo_path.clear();
        }
        self.had_file = has_file;
        self.list.sync_len(app.records.len());
    }

    pub fn apply_focus(&mut self) {
        self.logo_path.focused = self.focus == Focus::LogoPath;
        self.logo_text.focused = self.focus == Focus::LogoText;
        self.button_text.focused = self.focus == Focus::ButtonText;
        self.list.focused = self.focus == Focus::List;
    }

    /// Translates a terminal event into a core action, if it is one.
    pub fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        match event {
            TuiEvent::Quit => return Some(Action::Quit),
            TuiEvent::Save => return Some(Action::Submit),
            TuiEvent::Reload => return Some(Action::Load(LoadReason::Refresh)),
            TuiEvent::Resize => return None,
            TuiEvent::FocusNext => {
                self.focus = self.focus.next();
                return None;
            }
            TuiEvent::FocusPrev => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::LogoPath => match self.logo_path.handle_event(event)? {
                FieldEvent::Submit => {
                    let path = self.logo_path.value().trim();
                    if path.is_empty() {
                        Some(Action::ClearLogo)
                    } else {
                        Some(Action::PickLogo(PathBuf::from(path)))
                    }
                }
                // The path stays local until Enter
                FieldEvent::Changed(_) => None,
            },
            Focus::LogoText => match self.logo_text.handle_event(event)? {
                FieldEvent::Changed(text) => Some(Action::SetLogoText(text)),
                FieldEvent::Submit => Some(Action::Submit),
            },
            Focus::ButtonText => match self.button_text.handle_event(event)? {
                FieldEvent::Changed(text) => Some(Action::SetButtonText(text)),
                FieldEvent::Submit => Some(Action::Submit),
            },
            Focus::List => match self.list.handle_event(event)? {
                ListEvent::Edit(idx) => app.records.get(idx).cloned().map(Action::BeginEdit),
                ListEvent::Delete(idx) => app
                    .records
                    .get(idx)
                    .map(|record| Action::Delete(record.id.clone())),
                ListEvent::Reload => Some(Action::Load(LoadReason::Refresh)),
            },
        }
    }

    /// Handles the effects that stay inside the UI. Returns true for quit.
    fn apply_local_effect(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::Quit => true,
            // The form sits at the top already; moving focus brings it into play.
            Effect::FocusForm => {
                self.focus = Focus::LogoText;
                false
            }
            _ => false,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Runs one I/O effect on a tokio task and reports back over `tx`.
fn spawn_effect(
    service: Arc<dyn NavbarService>,
    effect: Effect,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    debug!("Spawning effect: {:?}", EffectKind(&effect));
    tokio::spawn(async move {
        if let Some(action) = perform(service.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to send effect result: receiver dropped");
        }
    })
    .abort_handle()
}

/// Debug view of an effect that leaves out file bytes.
struct EffectKind<'a>(&'a Effect);

impl std::fmt::Debug for EffectKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Effect::Save { mode, form } => write!(
                f,
                "Save({:?}, logo={})",
                mode,
                form.logo.as_ref().map_or(0, |l| l.bytes.len())
            ),
            other => write!(f, "{:?}", other),
        }
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let service: Arc<dyn NavbarService> = Arc::new(
        HttpNavbarService::new(&config.base_url, config.request_timeout)
            .map_err(|e| io::Error::other(e.to_string()))?,
    );
    let mut app = App::new(config.seed_policy);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut active_tasks: Vec<tokio::task::AbortHandle> = Vec::new();

    let dispatch = |app: &mut App,
                        tui: &mut TuiState,
                        tasks: &mut Vec<tokio::task::AbortHandle>,
                        action: Action|
     -> bool {
        debug!("Dispatching {}", action.kind());
        let effect = update(app, action);
        let quit = tui.apply_local_effect(&effect);
        if effect.needs_io() {
            tasks.retain(|h| !h.is_finished());
            tasks.push(spawn_effect(service.clone(), effect, tx.clone()));
        }
        tui.sync_from(app);
        quit
    };

    dispatch(&mut app, &mut tui, &mut active_tasks, Action::Load(LoadReason::Mount));
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let busy = app.is_loading || app.is_busy();
        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = tui.handle_event(&event, &app)
                && dispatch(&mut app, &mut tui, &mut active_tasks, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            dispatch(&mut app, &mut tui, &mut active_tasks, action);
        }
    }

    for handle in active_tasks.drain(..) {
        handle.abort();
    }
    info!(
        "Shutting down ({} live previews released)",
        app.previews.live()
    );
    drop(app);

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draft::FormMode;
    use crate::test_support::record;

    fn app_with_records() -> App {
        let mut app = App::default();
        app.records = vec![record("1", "X", "Y"), record("2", "P", "Q")];
        app
    }

    #[test]
    fn test_focus_cycles() {
        let mut focus = Focus::LogoPath;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::LogoPath);
        assert_eq!(Focus::LogoPath.prev(), Focus::List);
    }

    #[test]
    fn test_typing_in_button_field_sets_draft() {
        let app = App::default();
        let mut tui = TuiState::new();
        tui.focus = Focus::ButtonText;
        let action = tui.handle_event(&TuiEvent::InputChar('G'), &app);
        assert!(matches!(action, Some(Action::SetButtonText(ref t)) if t == "G"));
    }

    #[test]
    fn test_enter_in_text_field_submits() {
        let app = App::default();
        let mut tui = TuiState::new();
        assert!(matches!(
            tui.handle_event(&TuiEvent::Submit, &app),
            Some(Action::Submit)
        ));
        assert!(matches!(
            tui.handle_event(&TuiEvent::Save, &app),
            Some(Action::Submit)
        ));
    }

    #[test]
    fn test_logo_path_enter_picks_file() {
        let app = App::default();
        let mut tui = TuiState::new();
        tui.focus = Focus::LogoPath;
        for c in " logo.png ".chars() {
            assert!(tui.handle_event(&TuiEvent::InputChar(c), &app).is_none());
        }
        let action = tui.handle_event(&TuiEvent::Submit, &app);
        assert!(matches!(action, Some(Action::PickLogo(ref p)) if p == &PathBuf::from("logo.png")));
    }

    #[test]
    fn test_empty_logo_path_enter_clears() {
        let app = App::default();
        let mut tui = TuiState::new();
        tui.focus = Focus::LogoPath;
        assert!(matches!(
            tui.handle_event(&TuiEvent::Submit, &app),
            Some(Action::ClearLogo)
        ));
    }

    #[test]
    fn test_list_edit_and_delete_map_to_records() {
        let app = app_with_records();
        let mut tui = TuiState::new();
        tui.sync_from(&app);
        tui.focus = Focus::List;
        tui.handle_event(&TuiEvent::Down, &app);

        let edit = tui.handle_event(&TuiEvent::InputChar('e'), &app);
        assert!(matches!(edit, Some(Action::BeginEdit(ref r)) if r.id == "2"));
        let delete = tui.handle_event(&TuiEvent::InputChar('d'), &app);
        assert!(matches!(delete, Some(Action::Delete(ref id)) if id == "2"));
    }

    #[test]
    fn test_sync_from_reflects_reset_draft() {
        let mut app = App::default();
        let mut tui = TuiState::new();
        tui.focus = Focus::ButtonText;
        if let Some(action) = tui.handle_event(&TuiEvent::InputChar('B'), &app) {
            update(&mut app, action);
        }
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::Saved {
                mode: FormMode::Create,
                result: Ok(None),
            },
        );
        tui.sync_from(&app);
        assert_eq!(tui.button_text.value(), "");
    }

    #[test]
    fn test_typing_after_begin_edit_appends() {
        let mut app = app_with_records();
        let mut tui = TuiState::new();
        tui.sync_from(&app);
        update(&mut app, Action::BeginEdit(record("1", "Acme", "Go")));
        tui.sync_from(&app);

        let action = tui.handle_event(&TuiEvent::InputChar('!'), &app);
        assert!(matches!(action, Some(Action::SetLogoText(ref t)) if t == "Acme!"));
    }

    #[test]
    fn test_focus_form_effect_moves_focus() {
        let mut tui = TuiState::new();
        tui.focus = Focus::List;
        assert!(!tui.apply_local_effect(&Effect::FocusForm));
        assert_eq!(tui.focus, Focus::LogoText);
        assert!(tui.apply_local_effect(&Effect::Quit));
    }
}
