//! # Draft State
//!
//! The unsaved form: the logo file picked from disk (if any), the two text
//! fields, and which record is being edited.
//!
//! ```text
//! DraftState
//! ├── selected_file: Option<LogoFile>   // bytes + live preview handle
//! ├── existing_logo: Option<String>     // server data URI of the edited record
//! ├── logo_text: String
//! ├── button_text: String
//! ├── editing_id: Option<String>        // None = create, Some = update
//! └── touched: bool                     // user changed something since seeding
//! ```

use crate::api::{LogoUpload, NavbarForm, NavbarRecord};
use crate::core::preview::PreviewHandle;

pub const BUTTON_TEXT_REQUIRED: &str = "Button text is required!";

/// A logo read from disk, waiting to be uploaded.
#[derive(Debug)]
pub struct LogoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewHandle,
}

impl LogoFile {
    pub fn to_upload(&self) -> LogoUpload {
        LogoUpload {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Whether a submit creates a new record or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Which logo the form should show. A freshly picked file wins over the
/// record's current logo.
#[derive(Debug, PartialEq)]
pub enum LogoPreview<'a> {
    None,
    Local(&'a LogoFile),
    Remote(&'a str),
}

#[derive(Debug, Default, PartialEq)]
pub struct DraftState {
    pub selected_file: Option<LogoFile>,
    pub existing_logo: Option<String>,
    pub logo_text: String,
    pub button_text: String,
    pub editing_id: Option<String>,
    pub touched: bool,
}

impl PartialEq for LogoFile {
    fn eq(&self, other: &Self) -> bool {
        self.preview == other.preview
    }
}

impl DraftState {
    pub fn mode(&self) -> FormMode {
        match &self.editing_id {
            Some(id) => FormMode::Edit(id.clone()),
            None => FormMode::Create,
        }
    }

    pub fn preview(&self) -> LogoPreview<'_> {
        if let Some(file) = &self.selected_file {
            LogoPreview::Local(file)
        } else if let Some(uri) = &self.existing_logo {
            LogoPreview::Remote(uri)
        } else {
            LogoPreview::None
        }
    }

    /// Copies a record's texts and logo without targeting it for update.
    pub fn seed_from(&mut self, record: &NavbarRecord) {
        self.selected_file = None;
        self.existing_logo = record.logo.clone();
        self.logo_text = record.logo_text.clone();
        self.button_text = record.button_text.clone();
        self.touched = false;
    }

    /// Loads a record into the form and switches to update mode.
    pub fn begin_edit(&mut self, record: &NavbarRecord) {
        self.seed_from(record);
        self.editing_id = Some(record.id.clone());
    }

    pub fn set_logo_text(&mut self, text: String) {
        self.logo_text = text;
        self.touched = true;
    }

    pub fn set_button_text(&mut self, text: String) {
        self.button_text = text;
        self.touched = true;
    }

    /// Replaces the selected file. The previous file's preview is released.
    pub fn attach_file(&mut self, file: LogoFile) {
        self.selected_file = Some(file);
        self.touched = true;
    }

    pub fn clear_file(&mut self) {
        if self.selected_file.take().is_some() {
            self.touched = true;
        }
    }

    /// Presence check on the only required field.
    pub fn validate(&self) -> Result<(), String> {
        if self.button_text.is_empty() {
            return Err(BUTTON_TEXT_REQUIRED.to_string());
        }
        Ok(())
    }

    pub fn to_form(&self) -> NavbarForm {
        NavbarForm {
            logo: self.selected_file.as_ref().map(LogoFile::to_upload),
            logo_text: self.logo_text.clone(),
            button_text: self.button_text.clone(),
        }
    }

    /// Back to an empty create-mode form, releasing any local preview.
    pub fn reset(&mut self) {
        *self = DraftState::default();
    }
}
