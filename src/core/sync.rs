//! # Sync Controller
//!
//! The I/O half of the core. [`perform`] executes one [`Effect`] against a
//! [`NavbarService`] (or the filesystem, for logo files) and returns the
//! action that reports its outcome. [`SyncController`] owns an [`App`] and
//! drives `update` + `perform` to completion for each operation, which is
//! what headless callers and the integration tests use. The TUI runs the same
//! `perform` on spawned tasks instead.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::api::{NavbarForm, NavbarRecord, NavbarService, ServiceError};
use crate::core::action::{Action, Effect, LoadReason, update};
use crate::core::draft::FormMode;
use crate::core::state::{App, SeedPolicy};

/// Why an editor operation did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A required field is missing. Nothing was sent.
    Validation(String),
    /// Another save or delete is still in flight.
    Busy,
    /// A logo file could not be read.
    File(String),
    /// The service call failed.
    Service(ServiceError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Validation(msg) => write!(f, "validation error: {msg}"),
            SyncError::Busy => write!(f, "another request is in flight"),
            SyncError::File(msg) => write!(f, "file error: {msg}"),
            SyncError::Service(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<ServiceError> for SyncError {
    fn from(e: ServiceError) -> Self {
        SyncError::Service(e)
    }
}

async fn save(
    service: &dyn NavbarService,
    mode: &FormMode,
    form: NavbarForm,
) -> Result<Option<NavbarRecord>, ServiceError> {
    match mode {
        FormMode::Create => service.create(form).await,
        FormMode::Edit(id) => service.update(id, form).await,
    }
}

/// Runs one effect. Returns `None` for effects that need no I/O.
pub async fn perform(service: &dyn NavbarService, effect: Effect) -> Option<Action> {
    match effect {
        Effect::Fetch { generation, reason } => {
            debug!("Fetching navbar list #{} via {}", generation, service.name());
            Some(Action::Loaded {
                generation,
                reason,
                result: service.list().await,
            })
        }
        Effect::Save { mode, form } => {
            let result = save(service, &mode, form).await;
            Some(Action::Saved { mode, result })
        }
        Effect::Delete(id) => {
            let result = service.delete(&id).await;
            Some(Action::Deleted { id, result })
        }
        Effect::ReadLogo(path) => {
            let result = tokio::fs::read(&path).await.map_err(|e| e.to_string());
            Some(Action::LogoRead { path, result })
        }
        Effect::None | Effect::Quit | Effect::FocusForm | Effect::Rejected(_) => None,
    }
}

/// Owns the editor state and awaits every operation to completion.
pub struct SyncController {
    service: Arc<dyn NavbarService>,
    app: App,
}

impl SyncController {
    pub fn new(service: Arc<dyn NavbarService>, seed_policy: SeedPolicy) -> Self {
        Self {
            service,
            app: App::new(seed_policy),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn records(&self) -> &[NavbarRecord] {
        &self.app.records
    }

    pub fn status_message(&self) -> &str {
        &self.app.status_message
    }

    /// Applies `action`, then keeps performing effects until one needs no I/O.
    pub async fn dispatch(&mut self, action: Action) -> Effect {
        let mut effect = update(&mut self.app, action);
        while effect.needs_io() {
            match perform(self.service.as_ref(), effect).await {
                Some(next) => effect = update(&mut self.app, next),
                None => return Effect::None,
            }
        }
        effect
    }

    /// Initial load. Seeds the draft from the first record per the seed policy.
    pub async fn mount(&mut self) -> &[NavbarRecord] {
        self.dispatch(Action::Load(LoadReason::Mount)).await;
        &self.app.records
    }

    /// Re-fetches the full list. Failures leave an empty list and a log line.
    pub async fn load_all(&mut self) -> &[NavbarRecord] {
        self.dispatch(Action::Load(LoadReason::Refresh)).await;
        &self.app.records
    }

    pub fn set_logo_text(&mut self, text: impl Into<String>) {
        update(&mut self.app, Action::SetLogoText(text.into()));
    }

    pub fn set_button_text(&mut self, text: impl Into<String>) {
        update(&mut self.app, Action::SetButtonText(text.into()));
    }

    pub fn clear_logo(&mut self) {
        update(&mut self.app, Action::ClearLogo);
    }

    /// Reads a logo from disk and attaches it to the draft.
    pub async fn select_logo(&mut self, path: impl Into<PathBuf>) -> Result<(), SyncError> {
        match update(&mut self.app, Action::PickLogo(path.into())) {
            Effect::ReadLogo(path) => {
                let result = tokio::fs::read(&path).await.map_err(|e| e.to_string());
                let failure = result.as_ref().err().cloned();
                update(&mut self.app, Action::LogoRead { path, result });
                match failure {
                    Some(msg) => Err(SyncError::File(msg)),
                    None => Ok(()),
                }
            }
            Effect::Rejected(err) => Err(err),
            other => {
                warn!("Unexpected effect from PickLogo: {:?}", other);
                Ok(())
            }
        }
    }

    /// Sends the draft as a create or update, then refreshes the list.
    /// The draft is reset after the attempt whatever the outcome.
    pub async fn submit(&mut self) -> Result<Option<NavbarRecord>, SyncError> {
        match update(&mut self.app, Action::Submit) {
            Effect::Save { mode, form } => {
                let result = save(self.service.as_ref(), &mode, form).await;
                let outcome = result.clone();
                let follow_up = update(&mut self.app, Action::Saved { mode, result });
                self.run(follow_up).await;
                outcome.map_err(SyncError::from)
            }
            Effect::Rejected(err) => Err(err),
            other => {
                self.run(other).await;
                Ok(None)
            }
        }
    }

    /// Loads `record` into the draft in update mode.
    pub fn begin_edit(&mut self, record: &NavbarRecord) -> Result<(), SyncError> {
        match update(&mut self.app, Action::BeginEdit(record.clone())) {
            Effect::Rejected(err) => Err(err),
            _ => Ok(()),
        }
    }

    /// Deletes by id, then refreshes the list.
    pub async fn delete(&mut self, id: &str) -> Result<(), SyncError> {
        match update(&mut self.app, Action::Delete(id.to_string())) {
            Effect::Delete(id) => {
                let result = self.service.delete(&id).await;
                let outcome = result.clone();
                let follow_up = update(&mut self.app, Action::Deleted { id, result });
                self.run(follow_up).await;
                outcome.map_err(SyncError::from)
            }
            Effect::Rejected(err) => Err(err),
            other => {
                self.run(other).await;
                Ok(())
            }
        }
    }

    async fn run(&mut self, mut effect: Effect) {
        while effect.needs_io() {
            match perform(self.service.as_ref(), effect).await {
                Some(next) => effect = update(&mut self.app, next),
                None => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{MSG_ADDED, MSG_DELETE_FAILED, MSG_DELETED, MSG_UPDATED};
    use crate::core::draft::BUTTON_TEXT_REQUIRED;
    use crate::core::state::FormState;
    use crate::test_support::{Call, MemoryService, record};
    use std::io::Write;

    fn controller(service: &Arc<MemoryService>) -> SyncController {
        SyncController::new(service.clone(), SeedPolicy::FirstRecord)
    }

    #[tokio::test]
    async fn test_mount_with_one_record_seeds_draft() {
        let service = Arc::new(MemoryService::with_records(vec![record("1", "X", "Y")]));
        let mut sync = controller(&service);
        assert_eq!(sync.mount().await.len(), 1);
        let draft = &sync.app().draft;
        assert_eq!(draft.logo_text, "X");
        assert_eq!(draft.button_text, "Y");
        assert_eq!(
            draft.existing_logo.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[tokio::test]
    async fn test_empty_button_text_never_calls_service() {
        let service = Arc::new(MemoryService::default());
        let mut sync = controller(&service);
        sync.set_logo_text("Acme");
        let err = sync.submit().await.unwrap_err();
        assert_eq!(err, SyncError::Validation(BUTTON_TEXT_REQUIRED.to_string()));
        assert_eq!(sync.status_message(), BUTTON_TEXT_REQUIRED);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let service = Arc::new(MemoryService::default());
        let mut sync = controller(&service);
        sync.set_logo_text("A");
        sync.set_button_text("B");
        let saved = sync.submit().await.unwrap().unwrap();
        assert_eq!(saved.logo_text, "A");

        let records = sync.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].logo_text, "A");
        assert_eq!(records[0].button_text, "B");
        assert_eq!(sync.status_message(), MSG_ADDED);
        assert_eq!(service.calls(), vec![Call::Create, Call::List]);
    }

    #[tokio::test]
    async fn test_edit_then_submit_updates_same_record() {
        let service = Arc::new(MemoryService::with_records(vec![record("7", "X", "Y")]));
        let mut sync = controller(&service);
        sync.load_all().await;
        let target = sync.records()[0].clone();
        sync.begin_edit(&target).unwrap();
        sync.submit().await.unwrap();

        assert_eq!(service.calls(), vec![Call::List, Call::Update("7".to_string()), Call::List]);
        let form = service.last_form().unwrap();
        assert_eq!(form.logo, None);
        assert_eq!(form.logo_text, "X");
        assert_eq!(form.button_text, "Y");
        assert_eq!(sync.status_message(), MSG_UPDATED);
    }

    #[tokio::test]
    async fn test_draft_cleared_after_failed_submit() {
        let service = Arc::new(MemoryService::default());
        service.fail_next(ServiceError::Network("connection reset".to_string()));
        let mut sync = controller(&service);
        sync.begin_edit(&record("9", "X", "Y")).unwrap();
        let err = sync.submit().await.unwrap_err();
        assert!(matches!(err, SyncError::Service(ServiceError::Network(_))));

        let app = sync.app();
        assert_eq!(app.form_state(), FormState::Idle(FormMode::Create));
        assert!(app.draft.logo_text.is_empty());
        assert!(app.draft.button_text.is_empty());
        assert!(app.draft.editing_id.is_none());
        // No refresh after a failed write.
        assert_eq!(service.calls(), vec![Call::Update("9".to_string())]);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let service = Arc::new(MemoryService::with_records(vec![
            record("1", "X", "Y"),
            record("2", "P", "Q"),
        ]));
        let mut sync = controller(&service);
        sync.load_all().await;
        sync.delete("1").await.unwrap();
        assert_eq!(sync.status_message(), MSG_DELETED);
        assert!(sync.records().iter().all(|r| r.id != "1"));
        assert_eq!(sync.records().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list_and_sets_message() {
        let service = Arc::new(MemoryService::with_records(vec![record("1", "X", "Y")]));
        let mut sync = controller(&service);
        sync.load_all().await;
        let err = sync.delete("missing").await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Service(ServiceError::Api { status: 404, .. })
        ));
        assert_eq!(sync.status_message(), MSG_DELETE_FAILED);
        assert_eq!(sync.records().len(), 1);
    }

    #[tokio::test]
    async fn test_list_failure_yields_empty_list() {
        let service = Arc::new(MemoryService::with_records(vec![record("1", "X", "Y")]));
        service.fail_next(ServiceError::Network("refused".to_string()));
        let mut sync = controller(&service);
        assert!(sync.load_all().await.is_empty());
        assert!(sync.status_message().is_empty());
    }

    #[tokio::test]
    async fn test_select_logo_uploads_file_part() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let service = Arc::new(MemoryService::default());
        let mut sync = controller(&service);
        sync.select_logo(file.path()).await.unwrap();
        assert_eq!(sync.app().previews.live(), 1);

        sync.set_button_text("Go");
        sync.submit().await.unwrap();
        let upload = service.last_form().unwrap().logo.unwrap();
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes, b"\x89PNG".to_vec());
        assert_eq!(sync.app().previews.live(), 0);
    }

    #[tokio::test]
    async fn test_select_missing_logo_fails() {
        let service = Arc::new(MemoryService::default());
        let mut sync = controller(&service);
        let err = sync
            .select_logo("/definitely/not/here/logo.png")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::File(_)));
        assert!(sync.app().draft.selected_file.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_returns_terminal_effect() {
        let service = Arc::new(MemoryService::default());
        let mut sync = controller(&service);
        let effect = sync.dispatch(Action::BeginEdit(record("1", "X", "Y"))).await;
        assert_eq!(effect, Effect::FocusForm);
        let effect = sync.dispatch(Action::Load(LoadReason::Refresh)).await;
        assert_eq!(effect, Effect::None);
    }
}
