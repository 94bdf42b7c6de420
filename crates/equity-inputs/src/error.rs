use thiserror::Error;

/// Error taxonomy for the input tree and witness compiler.
///
/// Interactive validation never surfaces through this type; per-field
/// completeness checks stay boolean-valued (see `runtime::validate`). Only
/// compile/commit-time failures propagate as errors.
#[derive(Debug, Error)]
pub enum InputError {
    /// An input id was requested from a map that does not contain it. Always
    /// a tree/declaration mismatch, never a user error.
    #[error("no input found for id '{0}'")]
    Lookup(String),

    #[error("input '{id}' is invalid: {message}")]
    Validation { id: String, message: String },

    /// A derived value could not be produced because a dependency is missing
    /// or invalid. Swallowed into "no value yet" during editing, escalated to
    /// [`InputError::MissingInput`] at compile time.
    #[error("unable to compute value for '{id}': {message}")]
    Computation { id: String, message: String },

    #[error("missing required input '{0}' for witness compilation")]
    MissingInput(String),

    /// The template/clause pair is absent from the clause-flag table. This is
    /// a deployment defect, not a recoverable condition.
    #[error("no clause flag registered for '{template}.{clause}'")]
    UnknownClauseFlag { template: String, clause: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl InputError {
    /// Escalate an editing-time failure into the compile-time variant that
    /// names the offending input.
    #[must_use]
    pub fn into_missing_input(self, id: &str) -> Self {
        match self {
            Self::Lookup(_) | Self::Computation { .. } | Self::Validation { .. } => {
                Self::MissingInput(id.to_string())
            }
            other => other,
        }
    }
}
