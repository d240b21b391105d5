use thiserror::Error;

/// Errors raised by the receipt and refund actions.
///
/// Every error aborts the running action; [`Store::atomic`](crate::store::Store::atomic)
/// restores the store to its state before the action started.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StockError {
    /// Blocking user or configuration error (e.g. missing vendor location).
    #[error("user error: {0}")]
    User(String),

    /// The record is not in a state that allows the requested action.
    #[error("state error: {0}")]
    State(String),

    /// One or more field constraints failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced record does not exist in the store.
    #[error("{model} #{id} not found")]
    NotFound { model: &'static str, id: u64 },

    /// Receipt picking type mapping is inconsistent with the store.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unit, currency or tax arithmetic could not be carried out.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Configuration file could not be parsed.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StockError {
    /// Collapse a list of validation errors into a single error.
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Name of the violated constraint, if any (e.g. "shipping_required").
    pub constraint: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(constraint) = &self.constraint {
            write!(f, "[{}] {}: {}", constraint, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a constraint name.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: None,
        }
    }

    /// Create a validation error naming the violated constraint.
    pub fn with_constraint(
        field: impl Into<String>,
        message: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: Some(constraint.into()),
        }
    }
}
