use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl ModelError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::Validation { field, reason: reason.into() }
    }

    /// Name of the offending field as the backend spells it.
    pub fn field(&self) -> &'static str {
        match self {
            ModelError::Validation { field, .. } => *field,
        }
    }
}
