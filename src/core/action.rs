//! # Actions
//!
//! Everything that can happen in the editor becomes an `Action`.
//! User presses Ctrl+S? That's `Action::Submit`.
//! The list comes back? That's `Action::Loaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an [`Effect`] describing the I/O the caller should run
//! next. No side effects here. I/O happens in `core::sync::perform`, which
//! turns the effect back into an action.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                               │
//!          Action  ◀──  perform(service, effect)┘
//! ```

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};

use crate::api::{NavbarForm, NavbarRecord, ServiceError};
use crate::core::draft::{FormMode, LogoFile};
use crate::core::preview::guess_content_type;
use crate::core::state::{App, Mutation, SeedPolicy};
use crate::core::sync::SyncError;

pub const MSG_ADDED: &str = "Navbar added successfully!";
pub const MSG_UPDATED: &str = "Navbar updated successfully!";
pub const MSG_DELETED: &str = "Navbar deleted successfully!";
pub const MSG_SAVE_FALLBACK: &str = "Something went wrong.";
pub const MSG_SAVE_TRANSPORT: &str = "Error submitting data. Try again!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete navbar item.";
pub const MSG_BUSY: &str = "Please wait for the current request to finish.";

/// Why a fetch was issued. Only the mount load may seed the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    Mount,
    Refresh,
}

#[derive(Debug)]
pub enum Action {
    Load(LoadReason),
    Loaded {
        generation: u64,
        reason: LoadReason,
        result: Result<Vec<NavbarRecord>, ServiceError>,
    },
    SetLogoText(String),
    SetButtonText(String),
    /// Read a logo from disk and attach it to the draft.
    PickLogo(PathBuf),
    LogoRead {
        path: PathBuf,
        result: Result<Vec<u8>, String>,
    },
    ClearLogo,
    Submit,
    Saved {
        mode: FormMode,
        result: Result<Option<NavbarRecord>, ServiceError>,
    },
    BeginEdit(NavbarRecord),
    Delete(String),
    Deleted {
        id: String,
        result: Result<(), ServiceError>,
    },
    Quit,
}

impl Action {
    /// Short name for logs (the payloads can carry whole files).
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Load(_) => "Load",
            Action::Loaded { .. } => "Loaded",
            Action::SetLogoText(_) => "SetLogoText",
            Action::SetButtonText(_) => "SetButtonText",
            Action::PickLogo(_) => "PickLogo",
            Action::LogoRead { .. } => "LogoRead",
            Action::ClearLogo => "ClearLogo",
            Action::Submit => "Submit",
            Action::Saved { .. } => "Saved",
            Action::BeginEdit(_) => "BeginEdit",
            Action::Delete(_) => "Delete",
            Action::Deleted { .. } => "Deleted",
            Action::Quit => "Quit",
        }
    }
}

/// What the caller must do after `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch { generation: u64, reason: LoadReason },
    Save { mode: FormMode, form: NavbarForm },
    Delete(String),
    ReadLogo(PathBuf),
    /// Bring the form into view (an edit was just loaded into it).
    FocusForm,
    /// The action was refused. The status message already says why.
    Rejected(SyncError),
}

impl Effect {
    /// True for effects that `core::sync::perform` turns into a follow-up action.
    pub fn needs_io(&self) -> bool {
        matches!(
            self,
            Effect::Fetch { .. } | Effect::Save { .. } | Effect::Delete(_) | Effect::ReadLogo(_)
        )
    }
}

fn reject_busy(app: &mut App) -> Effect {
    debug!("Rejected while {:?} is in flight", app.in_flight);
    app.status_message = MSG_BUSY.to_string();
    Effect::Rejected(SyncError::Busy)
}

/// User-visible text for a failed create/update.
pub fn save_failure_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ServiceError::Api { message: None, .. } => MSG_SAVE_FALLBACK.to_string(),
        _ => MSG_SAVE_TRANSPORT.to_string(),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_string())
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load(reason) => {
            // A load issued before the mount result lands takes over its seeding.
            let reason = if app.mount_pending {
                LoadReason::Mount
            } else {
                reason
            };
            app.mount_pending = reason == LoadReason::Mount;
            app.load_generation += 1;
            app.is_loading = true;
            Effect::Fetch {
                generation: app.load_generation,
                reason,
            }
        }
        Action::Loaded {
            generation,
            reason,
            result,
        } => {
            if generation != app.load_generation {
                debug!(
                    "Dropping stale load #{} (latest is #{})",
                    generation, app.load_generation
                );
                return Effect::None;
            }
            app.is_loading = false;
            app.has_loaded = true;
            app.mount_pending = false;
            match result {
                Ok(records) => {
                    info!("Loaded {} navbar records ({:?})", records.len(), reason);
                    app.last_synced = Some(Local::now());
                    let may_seed = reason == LoadReason::Mount
                        && app.seed_policy == SeedPolicy::FirstRecord
                        && !app.draft.touched
                        && app.draft.editing_id.is_none();
                    if may_seed && let Some(first) = records.first() {
                        app.draft.seed_from(first);
                    }
                    app.records = records;
                }
                Err(e) => {
                    warn!("Error fetching navbar items: {}", e);
                    app.records.clear();
                }
            }
            Effect::None
        }
        Action::SetLogoText(text) => {
            if !app.is_submitting() {
                app.draft.set_logo_text(text);
            }
            Effect::None
        }
        Action::SetButtonText(text) => {
            if !app.is_submitting() {
                app.draft.set_button_text(text);
            }
            Effect::None
        }
        Action::PickLogo(path) => {
            if app.is_submitting() {
                return reject_busy(app);
            }
            Effect::ReadLogo(path)
        }
        Action::LogoRead { path, result } => {
            if app.is_submitting() {
                debug!("Discarding logo {} read during submit", path.display());
                return Effect::None;
            }
            match result {
                Ok(bytes) => {
                    let content_type = guess_content_type(&path).to_string();
                    let file_name = file_name_of(&path);
                    let preview = app.previews.allocate(&bytes);
                    info!("Selected logo {} ({} bytes)", file_name, bytes.len());
                    app.status_message = format!("Selected {}", file_name);
                    app.draft.attach_file(LogoFile {
                        file_name,
                        content_type,
                        bytes,
                        preview,
                    });
                }
                Err(e) => {
                    warn!("Failed to read logo {}: {}", path.display(), e);
                    app.status_message = format!("Could not read {}: {}", path.display(), e);
                }
            }
            Effect::None
        }
        Action::ClearLogo => {
            if !app.is_submitting() {
                app.draft.clear_file();
            }
            Effect::None
        }
        Action::Submit => {
            if app.is_busy() {
                return reject_busy(app);
            }
            if let Err(msg) = app.draft.validate() {
                app.status_message = msg.clone();
                return Effect::Rejected(SyncError::Validation(msg));
            }
            let mode = app.draft.mode();
            let form = app.draft.to_form();
            info!("Submitting navbar ({:?})", mode);
            app.mount_pending = false;
            app.in_flight = Some(Mutation::Save(mode.clone()));
            app.status_message = "Saving...".to_string();
            Effect::Save { mode, form }
        }
        Action::Saved { mode, result } => {
            app.in_flight = None;
            // The edit target never outlives one attempt.
            app.draft.reset();
            match result {
                Ok(_) => {
                    app.status_message = match mode {
                        FormMode::Create => MSG_ADDED,
                        FormMode::Edit(_) => MSG_UPDATED,
                    }
                    .to_string();
                    update(app, Action::Load(LoadReason::Refresh))
                }
                Err(e) => {
                    warn!("Save failed: {}", e);
                    app.status_message = save_failure_message(&e);
                    Effect::None
                }
            }
        }
        Action::BeginEdit(record) => {
            if app.is_busy() {
                return reject_busy(app);
            }
            info!("Editing navbar {}", record.id);
            app.draft.begin_edit(&record);
            Effect::FocusForm
        }
        Action::Delete(id) => {
            if app.is_busy() {
                return reject_busy(app);
            }
            info!("Deleting navbar {}", id);
            app.in_flight = Some(Mutation::Delete(id.clone()));
            Effect::Delete(id)
        }
        Action::Deleted { id, result } => {
            app.in_flight = None;
            match result {
                Ok(()) => {
                    if app.draft.editing_id.as_deref() == Some(id.as_str()) {
                        app.draft.reset();
                    }
                    app.status_message = MSG_DELETED.to_string();
                    update(app, Action::Load(LoadReason::Refresh))
                }
                Err(e) => {
                    warn!("Error deleting item {}: {}", id, e);
                    app.status_message = MSG_DELETE_FAILED.to_string();
                    Effect::None
                }
            }
        }
        Action::Quit => Effect::Quit,
    }
}
