//! # Remote Navbar Service
//!
//! Wire types, the [`NavbarService`] seam, and its reqwest-backed
//! implementation. Nothing here knows about the form or the UI.

pub mod client;
pub mod service;
pub mod types;

pub use client::{DEFAULT_REQUEST_TIMEOUT, HttpNavbarService};
pub use service::{NavbarService, ServiceError};
pub use types::{LogoUpload, NavbarForm, NavbarRecord};
