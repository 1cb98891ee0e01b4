//! Configuration errors
//!
//! Gameplay itself never fails: illegal moves fall back, blocked ghosts stall
//! and running out of lives is a phase. Only loading a tuning file can go wrong.

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The document was not valid tuning JSON
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is out of range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
