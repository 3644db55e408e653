use tablesketch_core::{ColorParseError, ConfigError};
use thiserror::Error;

/// Errors surfaced to the browser host.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid command: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not encode response: {0}")]
    Encode(serde_json::Error),
}

impl CommandError {
    /// The `{"error": "..."}` object returned in place of a result.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.to_string() }).to_string()
    }
}
