//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: mode, status message, last sync time
//! - `NavbarForm`: transient wrapper composing the form's fields
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `TextField`: single-line input with cursor
//! - `NavbarListState`: selection over the fetched records
//!
//! Components receive external data as props, never by reaching into `App`
//! themselves:
//!
//! ```rust,ignore
//! NavbarList { state: &mut tui.list, records: &app.records, .. }.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── text_field.rs    (Single-line input)
//! ├── navbar_form.rs   (Form panel + logo preview line)
//! └── navbar_list.rs   (Record cards with edit/delete)
//! ```

pub mod navbar_form;
pub mod navbar_list;
pub mod text_field;
pub mod title_bar;

pub use navbar_form::{FORM_HEIGHT, NavbarForm};
pub use navbar_list::{ListEvent, NavbarList, NavbarListState};
pub use text_field::{FieldEvent, TextField};
pub use title_bar::TitleBar;
