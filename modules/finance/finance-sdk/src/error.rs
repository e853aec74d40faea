//! Error types for the finance SDK.

use thiserror::Error;
use uuid::Uuid;

use crate::models::TransactionStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinanceError {
    #[error("Transaction not found: {id}")]
    NotFound { id: Uuid },

    #[error("Cannot move transaction from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FinanceError {
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn invalid_transition(from: TransactionStatus, to: TransactionStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
