use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid input: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Unknown calculation kind: {0}")]
    UnknownKind(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalcError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Field name for validation failures, `None` for every other kind.
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::Serialization(e.to_string())
    }
}
