use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::catalog::CatalogError, config::LoadError, domain::error::ValidationError,
    infra::error::InfraError,
};

/// Flattened error chain, outermost message first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn joined(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error("refusing to delete product {id} without --yes")]
    ConfirmationRequired { id: u64 },
    #[error("failed to render view: {0}")]
    Render(#[from] askama::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// One-line message fit for the terminal.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Catalog(err) if err.operation().is_read() => "Error loading products",
            AppError::Catalog(_) => "Catalog rejected the change",
            AppError::Validation(_) => "Please fill in all fields",
            AppError::Infra(InfraError::UnusableBaseUrl { .. }) | AppError::Config(_) => {
                "Stockroom is misconfigured"
            }
            AppError::Infra(InfraError::Subscriber(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::ClientBuild(_)) => "HTTP client could not start",
            AppError::Infra(InfraError::Io(_)) => "I/O failure",
            AppError::ConfirmationRequired { .. } => "Deletion needs confirmation",
            AppError::Render(_) | AppError::Unexpected(_) => "Unexpected error occurred",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
