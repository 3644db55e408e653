//! Browser facade for tablesketch.
//!
//! The host page creates one [`TableEditor`], sends JSON commands through
//! [`TableEditor::execute`] and renders the snapshot that comes back.

pub mod command;
mod error;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod web;

pub use command::{Command, Outcome};
pub use error::CommandError;
pub use session::Session;

use wasm_bindgen::prelude::*;

/// JavaScript handle to one editor session.
#[wasm_bindgen]
pub struct TableEditor {
    session: Session,
}

#[wasm_bindgen]
impl TableEditor {
    /// Create an editor. `config_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<TableEditor, JsError> {
        let session = Session::from_config_json(config_json)?;
        log::info!("table editor ready");
        Ok(Self { session })
    }

    /// Run a JSON command and return the outcome, or `{"error": "..."}`.
    pub fn execute(&mut self, command_json: &str) -> String {
        self.session.execute_json(command_json)
    }

    /// The current snapshot as JSON.
    pub fn snapshot(&self) -> String {
        self.session.snapshot_json()
    }
}
