//! # Core Application Logic
//!
//! The editor's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • State (App, draft)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • perform() (I/O)      │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ SyncCtrl   │
//!     │  Adapter   │                          │ (headless) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all editor state in one place
//! - [`draft`]: The unsaved form
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`sync`]: Effect execution and the `SyncController`
//! - [`preview`]: Scoped local logo previews
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod draft;
pub mod preview;
pub mod state;
pub mod sync;

pub use action::{Action, Effect, LoadReason, update};
pub use state::{App, FormState, SeedPolicy};
pub use sync::{SyncController, SyncError, perform};
