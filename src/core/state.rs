//! # Application State
//!
//! Everything the editor knows, in one place. Presentation state (focus,
//! cursors, list selection) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── draft: DraftState             // form state holder
//! ├── records: Vec<NavbarRecord>    // remote list store (last fetch)
//! ├── status_message: String        // user-visible message
//! ├── in_flight: Option<Mutation>   // the one save/delete being awaited
//! ├── load_generation: u64          // id of the most recently issued fetch
//! ├── is_loading: bool
//! ├── mount_pending: bool           // the seeding load has not landed yet
//! ├── has_loaded: bool              // at least one fetch has resolved
//! ├── last_synced: Option<DateTime> // last successful fetch
//! ├── seed_policy: SeedPolicy       // what the mount load does to the draft
//! └── previews: PreviewPool         // live local previews
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};

use crate::api::NavbarRecord;
use crate::core::draft::{DraftState, FormMode};
use crate::core::preview::PreviewPool;

/// What the initial load does with the first record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Pre-fill the form with the first record's texts and logo (create mode).
    #[default]
    FirstRecord,
    /// Leave the form empty.
    Never,
}

/// A write currently awaiting the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Save(FormMode),
    Delete(String),
}

/// The form's position in its lifecycle.
///
/// ```text
/// Idle(mode) ──edit──▶ Editing(mode) ──submit──▶ Submitting(mode) ──▶ Idle(Create)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle(FormMode),
    Editing(FormMode),
    Submitting(FormMode),
}

pub struct App {
    pub draft: DraftState,
    pub records: Vec<NavbarRecord>,
    pub status_message: String,
    pub in_flight: Option<Mutation>,
    pub load_generation: u64,
    pub is_loading: bool,
    /// The seeding load has been issued but no load has landed since.
    pub mount_pending: bool,
    pub has_loaded: bool,
    pub last_synced: Option<DateTime<Local>>,
    pub seed_policy: SeedPolicy,
    pub previews: PreviewPool,
}

impl App {
    pub fn new(seed_policy: SeedPolicy) -> Self {
        Self {
            draft: DraftState::default(),
            records: Vec::new(),
            status_message: String::new(),
            in_flight: None,
            load_generation: 0,
            is_loading: false,
            mount_pending: false,
            has_loaded: false,
            last_synced: None,
            seed_policy,
            previews: PreviewPool::new(),
        }
    }

    pub fn form_state(&self) -> FormState {
        if let Some(Mutation::Save(mode)) = &self.in_flight {
            return FormState::Submitting(mode.clone());
        }
        let mode = self.draft.mode();
        if self.draft.touched {
            FormState::Editing(mode)
        } else {
            FormState::Idle(mode)
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.in_flight, Some(Mutation::Save(_)))
    }

    /// True while any write is awaiting the service.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SeedPolicy::default())
    }
}
