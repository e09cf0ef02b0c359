use thiserror::Error;

/// Client-side rejection of a form draft, raised before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be {expected}, got `{value}`")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    pub fn invalid_number(field: &'static str, expected: &'static str, value: &str) -> Self {
        Self::InvalidNumber {
            field,
            expected,
            value: value.to_string(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field } | ValidationError::InvalidNumber { field, .. } => {
                field
            }
        }
    }
}
