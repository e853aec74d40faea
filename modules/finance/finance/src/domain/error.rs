//! Domain errors for the finance module.

use finance_sdk::{FinanceError, TransactionStatus};
use steward_security::SecurityError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    #[error("Cannot move transaction from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// Only drafts may be edited or deleted
    #[error("Transaction {id} is {status} and can no longer be changed")]
    NotEditable { id: Uuid, status: TransactionStatus },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    Security(#[from] SecurityError),

    #[error("Repository error: {0:#}")]
    Repository(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Convert domain errors to SDK errors for API boundary.
impl From<DomainError> for FinanceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(id) => FinanceError::not_found(id),
            DomainError::InvalidTransition { from, to } => {
                FinanceError::invalid_transition(from, to)
            }
            e @ (DomainError::NotEditable { .. } | DomainError::Security(_)) => {
                FinanceError::validation(e.to_string())
            }
            DomainError::Validation(message) => FinanceError::validation(message),
            DomainError::Repository(e) => {
                tracing::error!(error = %format!("{e:#}"), "Finance repository failure");
                FinanceError::internal("storage failure")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_client_facing_details() {
        let id = Uuid::new_v4();

        assert_eq!(
            FinanceError::from(DomainError::NotFound(id)),
            FinanceError::not_found(id)
        );
        assert_eq!(
            FinanceError::from(DomainError::InvalidTransition {
                from: TransactionStatus::Draft,
                to: TransactionStatus::Posted,
            }),
            FinanceError::invalid_transition(TransactionStatus::Draft, TransactionStatus::Posted)
        );
        assert!(matches!(
            FinanceError::from(DomainError::NotEditable {
                id,
                status: TransactionStatus::Posted
            }),
            FinanceError::Validation { .. }
        ));
    }

    #[test]
    fn test_repository_errors_are_opaque() {
        let err = DomainError::Repository(anyhow::anyhow!("UNIQUE constraint failed"));

        let sdk: FinanceError = err.into();

        assert_eq!(sdk, FinanceError::internal("storage failure"));
    }
}
