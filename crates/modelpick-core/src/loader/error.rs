use thiserror::Error;

/// Why a catalog load failed.
///
/// The `Display` text is what the picker shows as its error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Could not reach the model catalog: {0}")]
    Transport(String),

    #[error("Model catalog request failed with status {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Model catalog response was malformed: {0}")]
    Parse(String),

    #[error("Model catalog response contained no usable models")]
    Empty,
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}
